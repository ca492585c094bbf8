use crate::dashboard::{
    Dashboard, DashboardData, FrequencyCount, HeaderMetrics, LatestSource, LatestValues,
    MetricsSource, PerformanceSeries, ReturnPoint, SessionInfo, TradeSummary,
};
use core_types::{
    DEFAULT_INITIAL_CAPITAL, LiveData, PortfolioHistory, RunSummary, Trade, TradeColumn, TradeLog,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How many trades the "recent trades" table shows by default.
pub const DEFAULT_RECENT_TRADES: usize = 20;

const HUNDRED: Decimal = dec!(100);

/// A stateless calculator that turns a `LiveData` bundle into a `Dashboard`.
#[derive(Debug, Clone)]
pub struct MetricsDeriver {
    recent_trades_limit: usize,
}

impl Default for MetricsDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_TRADES)
    }
}

impl MetricsDeriver {
    pub fn new(recent_trades_limit: usize) -> Self {
        Self {
            recent_trades_limit,
        }
    }

    /// The main entry point. Returns `Dashboard::NoData` without deriving
    /// anything when there is neither a time series nor a summary.
    pub fn derive(&self, data: &LiveData) -> Dashboard {
        let (source, latest) = match LatestSource::resolve(data) {
            LatestSource::Empty => return Dashboard::NoData,
            LatestSource::FromSeries(values) => (MetricsSource::Series, values),
            LatestSource::FromSummary(values) => (MetricsSource::Summary, values),
        };

        let initial_capital = data
            .summary
            .as_ref()
            .map_or(DEFAULT_INITIAL_CAPITAL, RunSummary::initial_capital_or_default);

        Dashboard::Ready(Box::new(DashboardData {
            header: header_metrics(source, &latest, initial_capital),
            session: data.summary.as_ref().map(session_info),
            series: performance_series(&data.portfolio, initial_capital),
            trades: self.trade_summary(&data.trades),
        }))
    }

    fn trade_summary(&self, log: &TradeLog) -> TradeSummary {
        if log.is_empty() {
            return TradeSummary {
                columns: log.columns.clone(),
                ..TradeSummary::default()
            };
        }

        let by_symbol = log
            .has_column(TradeColumn::Symbol)
            .then(|| frequency_counts(log.trades.iter().map(|t| t.symbol.as_deref())));
        let by_side = log
            .has_column(TradeColumn::Side)
            .then(|| frequency_counts(log.trades.iter().map(|t| t.side.as_deref())));

        TradeSummary {
            logged: log.len(),
            columns: log.columns.clone(),
            recent: recent_trades(&log.trades, self.recent_trades_limit),
            by_symbol,
            by_side,
        }
    }
}

fn header_metrics(
    source: MetricsSource,
    latest: &LatestValues,
    initial_capital: Decimal,
) -> HeaderMetrics {
    let total_return_pct = return_pct(latest.portfolio_value, initial_capital);
    let buyhold_return_pct = return_pct(latest.buyhold_value, initial_capital);

    HeaderMetrics {
        source,
        initial_capital,
        portfolio_value: latest.portfolio_value,
        buyhold_value: latest.buyhold_value,
        total_trades: latest.total_trades,
        winning_trades: latest.winning_trades,
        losing_trades: latest.losing_trades,
        total_return_pct,
        buyhold_return_pct,
        alpha_pct: alpha_pct(total_return_pct, buyhold_return_pct),
        win_rate_pct: win_rate_pct(latest.winning_trades, latest.total_trades),
    }
}

fn session_info(summary: &RunSummary) -> SessionInfo {
    let start_time = match summary.start_time.as_deref() {
        Some(start) if !start.is_empty() => start.chars().take(19).collect(),
        _ => "N/A".to_string(),
    };

    SessionInfo {
        start_time,
        total_steps: summary.total_steps.unwrap_or_default(),
        duration_seconds: summary
            .duration_seconds
            .and_then(|d| d.trunc().to_u64())
            .unwrap_or_default(),
    }
}

fn performance_series(history: &PortfolioHistory, initial_capital: Decimal) -> PerformanceSeries {
    let points: Vec<ReturnPoint> = history
        .snapshots
        .iter()
        .map(|row| {
            let agent = row.portfolio_value.map(|v| return_pct(v, initial_capital));
            let benchmark = if history.has_buyhold {
                row.buyhold_value.map(|v| return_pct(v, initial_capital))
            } else {
                Some(Decimal::ZERO)
            };
            let alpha = agent.zip(benchmark).map(|(a, b)| alpha_pct(a, b));

            ReturnPoint {
                timestamp: row.timestamp,
                portfolio_value: row.portfolio_value,
                buyhold_value: row.buyhold_value,
                return_pct: agent,
                bh_return_pct: benchmark,
                alpha_pct: alpha,
            }
        })
        .collect();

    let timed = !points.is_empty() && points.iter().all(|p| p.timestamp.is_some());

    PerformanceSeries {
        points,
        has_buyhold: history.has_buyhold,
        timed,
    }
}

/// `(value / initial_capital - 1) * 100`, or 0 when `initial_capital <= 0`.
///
/// Decimal overflow (only possible with absurd inputs) also yields 0.
pub fn return_pct(value: Decimal, initial_capital: Decimal) -> Decimal {
    if initial_capital <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    value
        .checked_div(initial_capital)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|growth| growth.checked_mul(HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(%value, %initial_capital, "Return percentage overflowed; reporting 0.");
            Decimal::ZERO
        })
}

/// Agent return minus benchmark return.
pub fn alpha_pct(total_return_pct: Decimal, buyhold_return_pct: Decimal) -> Decimal {
    total_return_pct
        .checked_sub(buyhold_return_pct)
        .unwrap_or_else(|| {
            tracing::warn!(
                %total_return_pct,
                %buyhold_return_pct,
                "Alpha overflowed; reporting 0."
            );
            Decimal::ZERO
        })
}

/// `winning / total * 100`, or 0 when there are no trades. The counts are not
/// cross-checked against each other.
pub fn win_rate_pct(winning_trades: u64, total_trades: u64) -> Decimal {
    if total_trades == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(winning_trades) / Decimal::from(total_trades)) * HUNDRED
}

/// Counts occurrences of each non-empty label, most frequent first and ties
/// broken alphabetically so the output is deterministic.
pub fn frequency_counts<'a>(
    labels: impl IntoIterator<Item = Option<&'a str>>,
) -> Vec<FrequencyCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for label in labels.into_iter().flatten() {
        *counts.entry(label).or_default() += 1;
    }

    let mut counts: Vec<FrequencyCount> = counts
        .into_iter()
        .map(|(label, count)| FrequencyCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The last `limit` trades by file order, newest timestamp first.
/// Trades without a timestamp go to the end, keeping their relative order.
pub fn recent_trades(trades: &[Trade], limit: usize) -> Vec<Trade> {
    let start = trades.len().saturating_sub(limit);
    let mut recent = trades[start..].to_vec();

    recent.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{PortfolioSnapshot, TradeLog};

    fn snapshot(portfolio: Decimal, buyhold: Decimal, total: u64, won: u64) -> PortfolioSnapshot {
        PortfolioSnapshot {
            timestamp: None,
            portfolio_value: Some(portfolio),
            buyhold_value: Some(buyhold),
            total_trades: Some(total),
            winning_trades: Some(won),
            losing_trades: Some(total - won),
        }
    }

    fn series(rows: Vec<PortfolioSnapshot>) -> PortfolioHistory {
        PortfolioHistory {
            snapshots: rows,
            has_buyhold: true,
        }
    }

    fn summary(initial_capital: Decimal) -> RunSummary {
        RunSummary {
            initial_capital: Some(initial_capital),
            final_portfolio_value: Some(dec!(9500)),
            final_buyhold_value: Some(dec!(9800)),
            total_trades: Some(8),
            winning_trades: Some(2),
            losing_trades: Some(6),
            ..RunSummary::default()
        }
    }

    fn trade(symbol: &str, side: &str, minute: Option<u32>) -> Trade {
        Trade {
            timestamp: minute.map(|m| Utc.with_ymd_and_hms(2024, 5, 1, 0, m, 0).unwrap()),
            symbol: Some(symbol.to_string()),
            side: Some(side.to_string()),
            ..Trade::default()
        }
    }

    fn ready(dashboard: Dashboard) -> DashboardData {
        match dashboard {
            Dashboard::Ready(data) => *data,
            Dashboard::NoData => panic!("expected a ready dashboard"),
        }
    }

    #[test]
    fn return_pct_matches_the_formula() {
        assert_eq!(return_pct(dec!(11000), dec!(10000)), dec!(10));
        assert_eq!(return_pct(dec!(9000), dec!(10000)), dec!(-10));
        assert_eq!(return_pct(dec!(0), dec!(10000)), dec!(-100));
        assert_eq!(return_pct(dec!(1234.5), dec!(1000)), dec!(23.45));
    }

    #[test]
    fn return_pct_is_zero_without_positive_capital() {
        assert_eq!(return_pct(dec!(11000), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(return_pct(dec!(11000), dec!(-5)), Decimal::ZERO);
    }

    #[test]
    fn return_pct_overflow_degrades_to_zero() {
        assert_eq!(return_pct(Decimal::MAX, dec!(0.0000001)), Decimal::ZERO);
    }

    #[test]
    fn win_rate_is_zero_without_trades() {
        assert_eq!(win_rate_pct(5, 0), Decimal::ZERO);
        assert_eq!(win_rate_pct(25, 40), dec!(62.5));
    }

    #[test]
    fn headline_scenario_from_the_last_row() {
        let data = LiveData {
            portfolio: series(vec![
                snapshot(dec!(10000), dec!(10000), 0, 0),
                snapshot(dec!(11000), dec!(10500), 40, 25),
            ]),
            summary: Some(summary(dec!(10000))),
            ..LiveData::default()
        };

        let header = ready(MetricsDeriver::default().derive(&data)).header;

        assert_eq!(header.source, MetricsSource::Series);
        assert_eq!(header.total_return_pct, dec!(10.00));
        assert_eq!(header.buyhold_return_pct, dec!(5.00));
        assert_eq!(header.alpha_pct, dec!(5.00));
        assert_eq!(header.win_rate_pct, dec!(62.5));
        assert_eq!(header.losing_trades, 15);
    }

    #[test]
    fn alpha_is_the_difference_of_the_two_returns() {
        let data = LiveData {
            portfolio: series(vec![snapshot(dec!(10333.33), dec!(9876.54), 3, 1)]),
            ..LiveData::default()
        };
        let header = ready(MetricsDeriver::default().derive(&data)).header;
        assert_eq!(
            header.alpha_pct,
            header.total_return_pct - header.buyhold_return_pct
        );
    }

    #[test]
    fn falls_back_to_the_summary_when_the_series_is_empty() {
        let data = LiveData {
            summary: Some(summary(dec!(10000))),
            ..LiveData::default()
        };

        let derived = ready(MetricsDeriver::default().derive(&data));

        assert_eq!(derived.header.source, MetricsSource::Summary);
        assert_eq!(derived.header.portfolio_value, dec!(9500));
        assert_eq!(derived.header.total_return_pct, dec!(-5));
        assert_eq!(derived.header.buyhold_return_pct, dec!(-2));
        assert_eq!(derived.header.win_rate_pct, dec!(25));
        assert!(derived.series.is_empty());
    }

    #[test]
    fn nothing_loaded_is_no_data() {
        assert_eq!(
            MetricsDeriver::default().derive(&LiveData::default()),
            Dashboard::NoData
        );
    }

    #[test]
    fn trades_alone_are_still_no_data() {
        let data = LiveData {
            trades: TradeLog {
                trades: vec![trade("BTC", "buy", Some(1))],
                columns: TradeColumn::ALL.to_vec(),
            },
            ..LiveData::default()
        };
        assert!(MetricsDeriver::default().derive(&data).is_no_data());
    }

    #[test]
    fn capital_defaults_without_a_summary() {
        let data = LiveData {
            portfolio: series(vec![snapshot(dec!(12000), dec!(10000), 0, 0)]),
            ..LiveData::default()
        };
        let header = ready(MetricsDeriver::default().derive(&data)).header;
        assert_eq!(header.initial_capital, dec!(10000));
        assert_eq!(header.total_return_pct, dec!(20));
    }

    #[test]
    fn summary_without_capital_uses_the_default() {
        let data = LiveData {
            portfolio: series(vec![snapshot(dec!(12000), dec!(10000), 0, 0)]),
            summary: Some(RunSummary {
                total_steps: Some(10),
                ..RunSummary::default()
            }),
            ..LiveData::default()
        };
        let derived = ready(MetricsDeriver::default().derive(&data));
        assert_eq!(derived.header.initial_capital, dec!(10000));
        assert_eq!(derived.session.unwrap().start_time, "N/A");
    }

    #[test]
    fn zero_capital_zeroes_every_percentage() {
        let data = LiveData {
            portfolio: series(vec![snapshot(dec!(12000), dec!(11000), 4, 2)]),
            summary: Some(summary(Decimal::ZERO)),
            ..LiveData::default()
        };
        let derived = ready(MetricsDeriver::default().derive(&data));
        assert_eq!(derived.header.total_return_pct, Decimal::ZERO);
        assert_eq!(derived.header.alpha_pct, Decimal::ZERO);
        assert!(
            derived
                .series
                .points
                .iter()
                .all(|p| p.return_pct == Some(Decimal::ZERO))
        );
    }

    #[test]
    fn per_row_series_without_a_benchmark_uses_zero() {
        let data = LiveData {
            portfolio: PortfolioHistory {
                snapshots: vec![
                    PortfolioSnapshot {
                        portfolio_value: Some(dec!(10100)),
                        ..PortfolioSnapshot::default()
                    },
                    PortfolioSnapshot::default(),
                ],
                has_buyhold: false,
            },
            ..LiveData::default()
        };

        let derived = ready(MetricsDeriver::default().derive(&data));
        let points = &derived.series.points;

        assert_eq!(points[0].return_pct, Some(dec!(1)));
        assert_eq!(points[0].bh_return_pct, Some(Decimal::ZERO));
        assert_eq!(points[0].alpha_pct, Some(dec!(1)));
        assert_eq!(points[1].return_pct, None);
        assert_eq!(points[1].alpha_pct, None);
        // The header still reads the last row, whose value is missing.
        assert_eq!(derived.header.portfolio_value, Decimal::ZERO);
    }

    #[test]
    fn empty_benchmark_cell_leaves_the_row_without_alpha() {
        let data = LiveData {
            portfolio: series(vec![
                PortfolioSnapshot {
                    portfolio_value: Some(dec!(11000)),
                    buyhold_value: None,
                    ..PortfolioSnapshot::default()
                },
                snapshot(dec!(10200), dec!(10500), 0, 0),
            ]),
            ..LiveData::default()
        };

        let derived = ready(MetricsDeriver::default().derive(&data));
        let points = &derived.series.points;

        assert!(derived.series.has_buyhold);
        assert_eq!(points[0].return_pct, Some(dec!(10)));
        assert_eq!(points[0].bh_return_pct, None);
        assert_eq!(points[0].alpha_pct, None);
        assert_eq!(points[1].return_pct, Some(dec!(2)));
        assert_eq!(points[1].bh_return_pct, Some(dec!(5)));
        assert_eq!(points[1].alpha_pct, Some(dec!(-3)));
    }

    #[test]
    fn series_is_timed_only_when_every_row_has_a_timestamp() {
        let at = |m| Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, m, 0).unwrap());
        let mut first = snapshot(dec!(10000), dec!(10000), 0, 0);
        let mut second = snapshot(dec!(10100), dec!(10050), 1, 1);
        first.timestamp = at(0);
        second.timestamp = at(5);

        let timed = LiveData {
            portfolio: series(vec![first.clone(), second.clone()]),
            ..LiveData::default()
        };
        assert!(ready(MetricsDeriver::default().derive(&timed)).series.timed);

        second.timestamp = None;
        let partial = LiveData {
            portfolio: series(vec![first, second]),
            ..LiveData::default()
        };
        assert!(!ready(MetricsDeriver::default().derive(&partial)).series.timed);
    }

    #[test]
    fn inconsistent_counts_are_tolerated() {
        let data = LiveData {
            portfolio: series(vec![PortfolioSnapshot {
                total_trades: Some(2),
                winning_trades: Some(5),
                losing_trades: Some(4),
                ..snapshot(dec!(10000), dec!(10000), 0, 0)
            }]),
            ..LiveData::default()
        };
        let header = ready(MetricsDeriver::default().derive(&data)).header;
        assert_eq!(header.win_rate_pct, dec!(250));
    }

    #[test]
    fn symbol_counts_ignore_order() {
        let counts = frequency_counts([Some("BTC"), Some("ETH"), Some("BTC"), None]);
        assert_eq!(
            counts,
            vec![
                FrequencyCount { label: "BTC".into(), count: 2 },
                FrequencyCount { label: "ETH".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn distributions_follow_available_columns() {
        let data = LiveData {
            portfolio: series(vec![snapshot(dec!(10000), dec!(10000), 0, 0)]),
            trades: TradeLog {
                trades: vec![trade("BTC", "buy", Some(1)), trade("BTC", "sell", Some(2))],
                columns: vec![TradeColumn::Timestamp, TradeColumn::Side],
            },
            ..LiveData::default()
        };
        let trades = ready(MetricsDeriver::default().derive(&data)).trades;
        assert_eq!(trades.logged, 2);
        assert!(trades.by_symbol.is_none());
        assert_eq!(trades.by_side.map(|s| s.len()), Some(2));
    }

    #[test]
    fn recent_trades_take_the_tail_and_sort_newest_first() {
        let trades: Vec<Trade> = (0..25).map(|m| trade("BTC", "buy", Some(m))).collect();
        let mut shuffled = trades.clone();
        shuffled.swap(20, 24);

        let recent = recent_trades(&shuffled, 20);

        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].timestamp, trades[24].timestamp);
        assert_eq!(recent[19].timestamp, trades[5].timestamp);
    }

    #[test]
    fn undated_trades_sort_last() {
        let trades = vec![
            trade("A", "buy", None),
            trade("B", "buy", Some(3)),
            trade("C", "buy", Some(9)),
        ];
        let symbols: Vec<_> = recent_trades(&trades, 20)
            .into_iter()
            .filter_map(|t| t.symbol)
            .collect();
        assert_eq!(symbols, vec!["C", "B", "A"]);
    }

    #[test]
    fn session_info_truncates_and_defaults() {
        let info = session_info(&RunSummary {
            start_time: Some("2024-05-01T00:00:00.123456+00:00".to_string()),
            duration_seconds: Some(dec!(3725.9)),
            ..RunSummary::default()
        });
        assert_eq!(info.start_time, "2024-05-01T00:00:00");
        assert_eq!(info.duration_seconds, 3725);
        assert_eq!(info.total_steps, 0);
    }

    #[test]
    fn deriving_twice_is_byte_identical() {
        let data = LiveData {
            portfolio: series(vec![
                snapshot(dec!(10000), dec!(10000), 0, 0),
                snapshot(dec!(10437.19), dec!(10211.08), 7, 4),
            ]),
            trades: TradeLog {
                trades: vec![trade("ETH", "buy", Some(1)), trade("BTC", "sell", Some(2))],
                columns: TradeColumn::ALL.to_vec(),
            },
            summary: Some(summary(dec!(10000))),
        };
        let deriver = MetricsDeriver::default();

        let first = serde_json::to_string(&deriver.derive(&data)).unwrap();
        let second = serde_json::to_string(&deriver.derive(&data)).unwrap();
        assert_eq!(first, second);
    }
}
