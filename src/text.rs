use crate::calendar::{CellKind, MonthDescriptor};

const CELL_WIDTH: usize = 4;

/// Plain-text month, `cal` style. Today is marked with a trailing `*`.
pub fn render_month(month: &MonthDescriptor) -> String {
    let width  = CELL_WIDTH * 7;
    let title  = format!("{} {}", month.name, month.year);
    let mut out = format!("{:^width$}", title).trim_end().to_owned();
    out.push('\n');

    let labels: String = month.weekdays.iter().map(|l| format!("{l:>3} ")).collect();
    out.push_str(labels.trim_end());
    out.push('\n');

    for week in &month.matrix {
        let line: String = week.iter().map(|cell| match cell.day {
            Some(d) => {
                let mark = if cell.kind == CellKind::DayToday { '*' } else { ' ' };
                format!("{d:>3}{mark}")
            }
            None => " ".repeat(CELL_WIDTH),
        }).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
