use analytics::view::{self, DISCLAIMER, NO_DATA_MESSAGE, Trend};
use analytics::{Dashboard, DashboardData, FrequencyCount};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

/// Renders one dashboard state as plain-text tables.
pub fn render_report(title: &str, dashboard: &Dashboard) -> String {
    let mut sections = vec![title.to_string()];

    let data = match dashboard {
        Dashboard::NoData => {
            sections.push(NO_DATA_MESSAGE.to_string());
            return sections.join("\n\n");
        }
        Dashboard::Ready(data) => data,
    };

    if let Some(session) = &data.session {
        sections.push(view::session_caption(session));
    }
    sections.push(header_table(data).to_string());

    if data.trades.logged > 0 {
        sections.push(format!("Recent Trades\n{}", trades_table(data)));
        for (name, counts) in [
            ("By Symbol", &data.trades.by_symbol),
            ("By Side", &data.trades.by_side),
        ] {
            if let Some(counts) = counts.as_ref().filter(|c| !c.is_empty()) {
                sections.push(format!("{name}\n{}", distribution_table(counts)));
            }
        }
    }

    sections.push(DISCLAIMER.to_string());
    sections.join("\n\n")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_table(data: &DashboardData) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value", "Change"]);
    for card in view::header_cards(&data.header, data.trades.logged) {
        let color = match card.trend {
            Trend::Up => Color::Green,
            Trend::Down => Color::Red,
        };
        table.add_row(vec![
            Cell::new(card.label),
            Cell::new(&card.value),
            Cell::new(&card.delta).fg(color),
        ]);
    }
    table
}

fn trades_table(data: &DashboardData) -> Table {
    let trades = &data.trades;
    let mut table = new_table();
    table.set_header(trades.columns.iter().map(|c| c.as_str()));
    for trade in &trades.recent {
        table.add_row(
            trades
                .columns
                .iter()
                .map(|column| view::trade_cell(trade, *column)),
        );
    }
    table
}

fn distribution_table(counts: &[FrequencyCount]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Label", "Trades"]);
    for entry in counts {
        table.add_row(vec![entry.label.clone(), entry.count.to_string()]);
    }
    table
}
