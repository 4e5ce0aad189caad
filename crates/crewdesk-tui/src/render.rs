//! Turn one chat message into the lines that display it
//!
//! Every message becomes exactly one block. The action tag picks a card;
//! messages without one fall through to a plain bubble styled by role.

use crewdesk_core::employee::EmployeeSchedule;
use crewdesk_core::{ChatMessage, ChatRole, Employee, EmployeeDraft, MessageAction, ScheduleDay, Shift};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn render_message(message: &ChatMessage) -> Vec<Line<'static>> {
    match &message.action {
        Some(MessageAction::RenderEmployeeForm(draft)) => employee_form_card(draft),
        Some(MessageAction::EmployeeAdded(employee)) => employee_added_card(&message.content, employee),
        Some(MessageAction::Schedule(day)) => schedule_card(day),
        None => bubble(message),
    }
}

fn bubble(message: &ChatMessage) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match message.role {
        ChatRole::User => {
            lines.push(
                Line::from(Span::styled(
                    "You",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right),
            );
            for line in message.content.lines() {
                lines.push(
                    Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Cyan)))
                        .alignment(Alignment::Right),
                );
            }
        }
        ChatRole::Tool => {
            lines.push(Line::from(Span::styled(
                "Workflow result:",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )));
            // Preformatted JSON, keep indentation as is
            for line in message.content.lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::LightBlue),
                )));
            }
        }
        ChatRole::Assistant | ChatRole::Employee | ChatRole::Schedule => {
            lines.push(Line::from(Span::styled(
                "Assistant:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for line in message.content.lines() {
                lines.push(parse_markdown_line(line));
            }
        }
    }
    lines
}

fn card_title(title: String, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn employee_form_card(draft: &EmployeeDraft) -> Vec<Line<'static>> {
    let mut lines = vec![
        card_title("┌ New Employee Summary".to_string(), Color::White),
        Line::from(Span::styled(
            format!("│ {}", draft.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(email) = &draft.email {
        lines.push(Line::from(vec![label("│ "), Span::raw(email.clone())]));
    }
    if let Some(phone) = &draft.phone {
        lines.push(Line::from(vec![label("│ "), Span::raw(phone.clone())]));
    }
    lines.push(Line::from(vec![
        label("│ Pay Rate "),
        Span::styled(
            format!("${}/hour", draft.pay_rate),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        label("   Hours per Week "),
        Span::styled(
            format!("{} hours", draft.hours_per_week),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(label("│ Availability")));

    let mut chips = vec![label("│ ")];
    for day in draft.availability_names() {
        chips.push(Span::styled(
            format!(" {} ", day),
            Style::default().fg(Color::Blue).bg(Color::Rgb(219, 234, 254)),
        ));
        chips.push(Span::raw(" "));
    }
    lines.push(Line::from(chips));
    lines.push(Line::from(vec![
        label("│ Start "),
        Span::raw(draft.start_date.format("%b %-d, %Y").to_string()),
    ]));
    lines.push(
        Line::from(vec![
            Span::styled("[e] Edit Info", Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                "[c] Confirm & Save",
                Style::default().fg(Color::Black).bg(Color::White),
            ),
        ])
        .alignment(Alignment::Right),
    );
    lines
}

fn employee_added_card(confirmation: &str, employee: &Employee) -> Vec<Line<'static>> {
    let green = Style::default().fg(Color::Green);
    let mut lines = vec![
        card_title("┌ New Employee Added".to_string(), Color::Green),
        Line::from(Span::styled(format!("│ {}", confirmation), green)),
        Line::from(Span::styled(format!("│ Name: {}", employee.full_name()), green)),
    ];
    if let Some(email) = &employee.email {
        lines.push(Line::from(Span::styled(format!("│ Email: {}", email), green)));
    }
    lines.push(Line::from(Span::styled(
        format!("│ Rate: ${}/hr", employee.pay_rate),
        green,
    )));
    lines.push(Line::from(Span::styled(
        format!("│ Hours: {}hrs/week", employee.hours_per_week),
        green,
    )));
    if let Some(schedule) = &employee.schedule {
        lines.extend(employee_schedule_lines(schedule, green));
    }
    lines
}

fn employee_schedule_lines(schedule: &EmployeeSchedule, style: Style) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("├ Schedule:".to_string(), style.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(format!("│ Start Date: {}", schedule.start_date), style)),
        Line::from(Span::styled(
            format!("│ Time: {} - {}", schedule.start_time, schedule.end_time),
            style,
        )),
        Line::from(Span::styled(format!("│ Days: {}", schedule.days.join(", ")), style)),
    ]
}

pub fn schedule_card(day: &ScheduleDay) -> Vec<Line<'static>> {
    let blue = Style::default().fg(Color::LightBlue);
    let mut lines = vec![card_title(format!("┌ Schedule for {}", day.date), Color::LightBlue)];

    for shift in [Shift::Morning, Shift::Evening] {
        lines.push(Line::from(Span::styled(
            format!("│ {}:", shift.label()),
            blue.add_modifier(Modifier::BOLD),
        )));
        let people = day.shift(shift);
        if people.is_empty() {
            lines.push(Line::from(label("│   (nobody yet)")));
        }
        for person in people {
            lines.push(Line::from(Span::styled(format!("│   {}", person.name), blue)));
        }
    }
    lines
}

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find("**") {
            Some(end) if end > 0 => {
                if start > 0 {
                    spans.push(Span::raw(rest[..start].to_string()));
                }
                spans.push(Span::styled(
                    after[..end].to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                rest = &after[end + 2..];
            }
            // No closing **, treat as literal
            _ => break,
        }
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crewdesk_core::employee::WEEKDAYS;
    use crewdesk_core::ShiftAssignment;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn draft(email: Option<&str>) -> EmployeeDraft {
        EmployeeDraft {
            name: "Sarah Johnson".to_string(),
            email: email.map(str::to_string),
            phone: None,
            pay_rate: 28,
            hours_per_week: 22,
            availability: WEEKDAYS.to_vec(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 28).unwrap(),
        }
    }

    #[test]
    fn test_employee_form_card() {
        let message = ChatMessage::employee_form("Review please", draft(Some("sarah@example.com")));
        let rendered = text(&render_message(&message));

        assert_eq!(rendered[0], "┌ New Employee Summary");
        assert!(rendered.iter().any(|l| l.contains("Sarah Johnson")));
        assert!(rendered.iter().any(|l| l.contains("sarah@example.com")));
        assert!(rendered.iter().any(|l| l.contains("$28/hour") && l.contains("22 hours")));
        assert!(rendered.iter().any(|l| l.contains(" Monday ") && l.contains(" Friday ")));
        assert!(rendered.iter().any(|l| l.contains("Sep 28, 2025")));
        assert!(rendered.last().unwrap().contains("[c] Confirm & Save"));
        // The card replaces the text content
        assert!(!rendered.iter().any(|l| l.contains("Review please")));
    }

    #[test]
    fn test_employee_form_without_email_skips_line() {
        let message = ChatMessage::employee_form("", draft(None));
        let rendered = text(&render_message(&message));
        assert!(!rendered.iter().any(|l| l.contains('@')));
    }

    #[test]
    fn test_user_bubble_is_right_aligned() {
        let lines = render_message(&ChatMessage::user("hello\nthere"));
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.alignment == Some(Alignment::Right)));
    }

    #[test]
    fn test_tool_bubble_keeps_indentation() {
        let lines = render_message(&ChatMessage::tool("{\n  \"ok\": true\n}"));
        let rendered = text(&lines);
        assert_eq!(rendered[0], "Workflow result:");
        assert_eq!(rendered[2], "  \"ok\": true");
    }

    #[test]
    fn test_employee_added_card() {
        let employee = Employee {
            id: "emp_1".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Johnson".to_string(),
            email: Some("sarah@example.com".to_string()),
            hours_per_week: 22.0,
            pay_rate: 28.0,
            schedule: Some(EmployeeSchedule {
                start_date: "2025-09-28".to_string(),
                start_time: "08:00".to_string(),
                end_time: "14:00".to_string(),
                days: vec!["Monday".to_string(), "Tuesday".to_string()],
            }),
        };
        let message = ChatMessage::employee_added("Successfully added Sarah Johnson to the system!", employee);
        let rendered = text(&render_message(&message));

        assert_eq!(rendered[0], "┌ New Employee Added");
        assert!(rendered.contains(&"│ Rate: $28/hr".to_string()));
        assert!(rendered.contains(&"│ Hours: 22hrs/week".to_string()));
        assert!(rendered.contains(&"│ Time: 08:00 - 14:00".to_string()));
        assert!(rendered.contains(&"│ Days: Monday, Tuesday".to_string()));
    }

    #[test]
    fn test_schedule_card_lists_both_shifts() {
        let mut day = ScheduleDay::new(NaiveDate::from_ymd_opt(2025, 9, 29).unwrap());
        day.assign(
            Shift::Morning,
            ShiftAssignment {
                id: "1".to_string(),
                name: "Sarah Johnson".to_string(),
            },
        );
        let rendered = text(&render_message(&ChatMessage::schedule(day)));

        assert_eq!(
            rendered,
            vec![
                "┌ Schedule for 2025-09-29",
                "│ Morning Shift (8am-2pm):",
                "│   Sarah Johnson",
                "│ Evening Shift (2pm-8pm):",
                "│   (nobody yet)",
            ]
        );
    }

    #[test]
    fn test_parse_markdown_line() {
        let line = parse_markdown_line("Added **Sarah** today");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "Sarah");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));

        let unclosed = parse_markdown_line("a **b");
        assert_eq!(unclosed.spans.len(), 1);
        assert_eq!(unclosed.spans[0].content, "a **b");
    }
}
