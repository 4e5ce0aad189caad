use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use crewdesk_core::{BusinessMetrics, Provider};
use crate::app::{App, InputMode};
use crate::render::{render_message, schedule_card};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, input, footer
    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    if app.show_calendar {
        let [chat_area, calendar_area] = Layout::horizontal([
            Constraint::Percentage(68),
            Constraint::Percentage(32),
        ])
        .areas(body_area);
        render_chat(app, frame, chat_area);
        render_calendar(app, frame, calendar_area);
    } else {
        render_chat(app, frame, body_area);
    }

    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" crewdesk ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(metrics_summary(&app.metrics.snapshot()), Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// "Employees 3 · Hours 62 · Payroll $1,416.00"
pub fn metrics_summary(metrics: &BusinessMetrics) -> String {
    format!(
        "Employees {} · Hours {} · Payroll ${}",
        metrics.total_employees,
        metrics.total_hours,
        format_currency(metrics.total_payroll)
    )
}

fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).abs().to_string();
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, (cents % 100).abs())
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let provider_label = match app.provider {
        Provider::Local => "local assistant".to_string(),
        Provider::Workflow => format!("{} @ {}", app.provider_name, app.base_url),
    };
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.input_mode == InputMode::Normal {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(format!(" Assistant: {} ", provider_label));

    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        lines.extend(render_message(message));
        lines.push(Line::default());
    }

    if app.conversation.is_awaiting_reply() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        let waiting = app.conversation.pending();
        let label = if waiting > 1 {
            format!("Thinking{} ({} requests)", dots, waiting)
        } else {
            format!("Thinking{}", dots)
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Inner size minus borders, for scroll calculations
    let inner_width = area.width.saturating_sub(2).max(1);
    let inner_height = area.height.saturating_sub(2);

    // Count rows before the block is attached so borders are not included
    let chat = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let total_lines = chat.line_count(inner_width).min(u16::MAX as usize) as u16;

    app.chat_max_scroll = total_lines.saturating_sub(inner_height);
    if app.follow_bottom || app.chat_scroll > app.chat_max_scroll {
        app.chat_scroll = app.chat_max_scroll;
    }

    frame.render_widget(chat.block(chat_block).scroll((app.chat_scroll, 0)), area);

    if app.chat_max_scroll > 0 {
        let mut scrollbar_state = ScrollbarState::new(app.chat_max_scroll as usize)
            .position(app.chat_scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_calendar(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Calendar ");

    let text = if app.calendar.is_empty() {
        Text::from(Span::styled(
            "No shifts planned yet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines = Vec::new();
        for day in app.calendar.days() {
            lines.extend(schedule_card(day));
            lines.push(Line::default());
        }
        Text::from(lines)
    };

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
        .title(" Message ");

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.input.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "Add an employee or ask for help...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible_text: String = app.input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    // Show cursor when editing
    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Editing => "Enter send · Esc browse · Ctrl+C quit",
        InputMode::Normal => "i type · j/k scroll · e edit · c confirm · P provider · C calendar · q quit",
    };

    let mut spans = vec![Span::styled(format!(" {} ", hints), Style::default().fg(Color::DarkGray))];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewdesk_core::Config;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use tokio::sync::mpsc;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(616.0), "616.00");
        assert_eq!(format_currency(1416.5), "1,416.50");
        assert_eq!(format_currency(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_metrics_summary() {
        let metrics = BusinessMetrics {
            total_employees: 3,
            total_hours: 62.0,
            total_payroll: 1416.0,
        };
        assert_eq!(metrics_summary(&metrics), "Employees 3 · Hours 62 · Payroll $1,416.00");
    }

    #[test]
    fn test_autoscroll_shows_end_of_word_wrapped_message() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::new(), tx);
        app.show_calendar = false;

        // Ten columns inside the borders fit one six-letter word per row
        let message = "aaaaaa bbbbbb cccccc dddddd eeeeee ffffff gggggg hhhhhh iiiiii jjjjjj kkkkkk llllll ZZEND";
        app.conversation.submit(message);

        let mut terminal = Terminal::new(TestBackend::new(12, 14)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        assert_eq!(app.chat_scroll, app.chat_max_scroll);
        let screen = screen_text(terminal.backend().buffer());
        assert!(screen.contains("ZZEND"), "newest text scrolled out:\n{}", screen);
        assert!(screen.contains("Thinking"), "indicator scrolled out:\n{}", screen);
    }

    fn screen_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
