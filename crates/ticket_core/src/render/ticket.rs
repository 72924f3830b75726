use crate::model::{EnrichedComment, NormalizedTicket};
use crate::time::format_timestamp;

use super::format::{clean_content, format_file_size, quote, table_cell};

const NOT_AVAILABLE: &str = "N/A";

pub fn render_ticket(ticket: &NormalizedTicket) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_front_matter(&mut lines, ticket);

    lines.push(format!("# Ticket #{}: {}", ticket.id, ticket.subject));
    lines.push(String::new());

    push_basic_info(&mut lines, ticket);

    lines.push("## Description".to_string());
    lines.push(String::new());
    lines.push(clean_content(&ticket.description));
    lines.push(String::new());

    let custom_fields: Vec<(u64, String)> = ticket
        .custom_fields
        .iter()
        .filter_map(|field| field.display_value().map(|value| (field.id, value)))
        .collect();
    if !custom_fields.is_empty() {
        lines.push("## Custom Fields".to_string());
        lines.push(String::new());
        for (id, value) in custom_fields {
            lines.push(format!("- **Field {}**: {}", id, value));
        }
        lines.push(String::new());
    }

    if !ticket.comments.is_empty() {
        lines.push("## Comment History".to_string());
        lines.push(String::new());
        for comment in &ticket.comments {
            push_comment(&mut lines, comment);
        }
    }

    lines.join("\n")
}

fn push_front_matter(lines: &mut Vec<String>, ticket: &NormalizedTicket) {
    lines.push("---".to_string());
    lines.push(format!("id: {}", ticket.id));
    lines.push(format!("subject: {}", quote(&ticket.subject)));
    lines.push(format!("status: {}", ticket.status));
    lines.push(format!(
        "priority: {}",
        ticket.priority.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "type: {}",
        ticket.ticket_type.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!("created_at: {}", ticket.created_at));
    lines.push(format!("updated_at: {}", ticket.updated_at));
    lines.push(format!("requester: {}", quote(&ticket.requester_name)));
    if let Some(assignee) = &ticket.assignee_name {
        lines.push(format!("assignee: {}", quote(assignee)));
    }
    if !ticket.tags.is_empty() {
        let tags: Vec<String> = ticket.tags.iter().map(|tag| quote(tag)).collect();
        lines.push(format!("tags: [{}]", tags.join(", ")));
    }
    lines.push("---".to_string());
    lines.push(String::new());
}

fn push_basic_info(lines: &mut Vec<String>, ticket: &NormalizedTicket) {
    lines.push("## Basic Information".to_string());
    lines.push(String::new());
    lines.push("| Field | Value |".to_string());
    lines.push("|-------|-------|".to_string());

    let mut row = |label: &str, value: &str| {
        lines.push(format!("| {} | {} |", label, table_cell(value)));
    };
    row("Ticket ID", &ticket.id.to_string());
    row("Status", &ticket.status);
    row("Priority", ticket.priority.as_deref().unwrap_or(NOT_AVAILABLE));
    row("Type", ticket.ticket_type.as_deref().unwrap_or(NOT_AVAILABLE));
    row("Created", &format_timestamp(&ticket.created_at));
    row("Updated", &format_timestamp(&ticket.updated_at));
    row("Requester", &ticket.requester_name);
    if let Some(assignee) = &ticket.assignee_name {
        row("Assignee", assignee);
    }
    if !ticket.tags.is_empty() {
        row("Tags", &ticket.tags.join(", "));
    }

    lines.push(String::new());
}

fn push_comment(lines: &mut Vec<String>, comment: &EnrichedComment) {
    lines.push(format!(
        "### {}{} - {}",
        comment.author_name,
        comment.author_role.suffix(),
        format_timestamp(&comment.created_at)
    ));
    lines.push(String::new());
    if !comment.is_public {
        lines.push("**[Internal Note]**".to_string());
        lines.push(String::new());
    }
    lines.push(clean_content(&comment.body));

    if !comment.attachments.is_empty() {
        lines.push(String::new());
        lines.push("**Attachments:**".to_string());
        for attachment in &comment.attachments {
            lines.push(format!(
                "- [{}]({}) ({})",
                attachment.file_name,
                attachment.content_url,
                format_file_size(attachment.size_bytes)
            ));
        }
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fakes::sample_ticket;
    use crate::model::{CommentRole, CustomField};

    #[test]
    fn renders_all_sections() {
        let out = render_ticket(&sample_ticket());

        assert!(out.starts_with("---\nid: 123\nsubject: \"Test\"\nstatus: open\n"));
        assert!(out.contains("priority: high\ntype: incident\n"));
        assert!(out.contains("requester: \"Alice\"\nassignee: \"User 1002\"\n"));
        assert!(out.contains("tags: [\"bug\", \"urgent\"]\n---\n"));
        assert!(out.contains("# Ticket #123: Test"));
        assert!(out.contains("| Ticket ID | 123 |"));
        assert!(out.contains("| Created | 2023-01-01 10:00:00 UTC |"));
        assert!(out.contains("| Requester | Alice |"));
        assert!(out.contains("| Assignee | User 1002 |"));
        assert!(out.contains("| Tags | bug, urgent |"));
        assert!(out.contains("## Description\n\nPrinter & scanner offline\n"));
        assert!(out.contains("## Custom Fields\n\n- **Field 1**: gold plan\n"));
        assert!(!out.contains("**Field 2**"));
        assert!(out.contains("## Comment History"));
        assert!(out.contains("### Alice (Requester) - 2023-01-01 10:05:00 UTC"));
        assert!(out.contains("### Bob (Agent) - not a timestamp"));
        assert!(out.contains("**[Internal Note]**\n\nLooking into it"));
        assert!(out.contains(
            "**Attachments:**\n- [screenshot.png](https://example.com/screenshot.png) (1 KB)"
        ));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let out = render_ticket(&sample_ticket());
        let order = [
            "id: 123",
            "# Ticket #123",
            "## Basic Information",
            "## Description",
            "## Custom Fields",
            "## Comment History",
        ];
        let positions: Vec<usize> = order.iter().map(|needle| out.find(needle).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn internal_note_marker_only_on_private_comments() {
        let out = render_ticket(&sample_ticket());
        assert_eq!(out.matches("**[Internal Note]**").count(), 1);
    }

    #[test]
    fn missing_assignee_is_omitted() {
        let mut ticket = sample_ticket();
        ticket.assignee_name = None;
        let out = render_ticket(&ticket);
        assert!(!out.contains("assignee:"));
        assert!(!out.contains("| Assignee |"));
    }

    #[test]
    fn empty_tags_are_omitted() {
        let mut ticket = sample_ticket();
        ticket.tags.clear();
        let out = render_ticket(&ticket);
        assert!(!out.contains("tags:"));
        assert!(!out.contains("| Tags |"));
    }

    #[test]
    fn no_comments_means_no_history_section() {
        let mut ticket = sample_ticket();
        ticket.comments.clear();
        let out = render_ticket(&ticket);
        assert!(!out.contains("## Comment History"));
    }

    #[test]
    fn custom_fields_section_dropped_when_nothing_qualifies() {
        let mut ticket = sample_ticket();
        ticket.custom_fields = vec![CustomField {
            id: 9,
            value: Some(json!("")),
        }];
        let out = render_ticket(&ticket);
        assert!(!out.contains("## Custom Fields"));
    }

    #[test]
    fn missing_priority_and_type_render_placeholder() {
        let mut ticket = sample_ticket();
        ticket.priority = None;
        ticket.ticket_type = None;
        let out = render_ticket(&ticket);
        assert!(out.contains("priority: N/A\ntype: N/A"));
        assert!(out.contains("| Priority | N/A |"));
    }

    #[test]
    fn collaborator_suffix() {
        let mut ticket = sample_ticket();
        ticket.comments[0].author_role = CommentRole::Collaborator;
        let out = render_ticket(&ticket);
        assert!(out.contains("### Alice (Collaborator) - "));
    }

    #[test]
    fn quotes_in_subject_are_escaped() {
        let mut ticket = sample_ticket();
        ticket.subject = "The \"big\" outage".to_string();
        let out = render_ticket(&ticket);
        assert!(out.contains("subject: \"The \\\"big\\\" outage\""));
        assert!(out.contains("# Ticket #123: The \"big\" outage"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let ticket = sample_ticket();
        assert_eq!(render_ticket(&ticket), render_ticket(&ticket));
    }
}
