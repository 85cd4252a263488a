//! Reminder message templates

use serde_json::{json, Value};

/// Reminder that an issue has no due date
pub fn missing_due_date_message(slack_user_id: &str, link: &str, number: u64, title: &str) -> Value {
    section(format!(
        ":alarm_clock:  <@{}> \n Beep-boop, you forgot to add the due date to the issue, #{}  <{}| {}>",
        slack_user_id, number, link, title
    ))
}

/// Reminder that an issue has no Domain field
pub fn missing_domain_message(slack_user_id: &str, link: &str, number: u64, title: &str) -> Value {
    section(format!(
        ":rotating_light: Hey <@{}>, \n Heads up, you forgot to add the 'Domain' field to issue #{} <{}|{}>",
        slack_user_id, number, link, title
    ))
}

fn section(text: String) -> Value {
    json!([{
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": text,
        }
    }])
}
