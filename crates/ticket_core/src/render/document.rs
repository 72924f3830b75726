use chrono::{DateTime, Utc};

use crate::model::NormalizedTicket;
use crate::time::format_datetime;

use super::format::slugify;
use super::ticket::render_ticket;

/// Anchor Markdown viewers generate for the ticket's level-1 heading.
pub fn ticket_anchor(ticket: &NormalizedTicket) -> String {
    slugify(&heading_text(ticket))
}

fn heading_text(ticket: &NormalizedTicket) -> String {
    format!("Ticket #{}: {}", ticket.id, ticket.subject)
}

pub fn render_batch(tickets: &[NormalizedTicket]) -> String {
    render_batch_at(tickets, Utc::now())
}

pub fn render_batch_at(tickets: &[NormalizedTicket], exported_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        "# Helpdesk Ticket Export".to_string(),
        String::new(),
        format!("Exported at: {}", format_datetime(&exported_at)),
        format!("Ticket count: {}", tickets.len()),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    if tickets.len() > 1 {
        lines.push("## Table of Contents".to_string());
        lines.push(String::new());
        for ticket in tickets {
            lines.push(format!(
                "- [{}](#{})",
                heading_text(ticket),
                ticket_anchor(ticket)
            ));
        }
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    for (index, ticket) in tickets.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
        }
        lines.push(render_ticket(ticket));
    }

    lines.join("\n")
}
