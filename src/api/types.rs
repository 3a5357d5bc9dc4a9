use serde::{Deserialize, Deserializer, Serialize};

/// Name shown for schedules that were never named (or renamed to "")
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub room: String,
    // Items nested in course classes come without a name
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub has_edit_access: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
}

impl Schedule {
    /// Raw name with entities decoded, empty when the schedule has no name
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(decode_html_entities)
            .unwrap_or_default()
    }

    /// Name as the rename field starts out: unnamed schedules read "Untitled"
    pub fn editable_name(&self) -> String {
        let name = self.display_name();
        if name.is_empty() {
            UNTITLED.to_string()
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    pub user_schedule: Schedule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleListResponse {
    #[serde(default)]
    pub user_schedules: Vec<Schedule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveScheduleRequest<'a> {
    pub schedule_items: &'a [ScheduleItem],
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameScheduleRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthTicketRequest<'a> {
    pub ticket: &'a str,
    pub service_url: &'a str,
}

/// Result of exchanging an SSO ticket
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub major_id: Option<String>,
    pub token: String,
}

/// The signed-in user looking at a schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseClass {
    pub name: String,
    #[serde(default)]
    pub lecturer: Vec<String>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub name: String,
    pub credit: u32,
    pub term: u32,
    #[serde(default)]
    pub classes: Vec<CourseClass>,
}

/// Course catalogue of one period for a major
#[derive(Debug, Clone, Deserialize)]
pub struct CoursesResponse {
    pub name: String,
    #[serde(default)]
    pub is_detail: bool,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}

/// Decode the HTML entities the backend leaves in schedule names
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities are short; anything without a nearby ';' is a literal '&'
        let decoded = tail
            .get(1..)
            .and_then(|t| t.find(';').filter(|&end| end <= 10).map(|end| (&t[..end], end)))
            .and_then(|(entity, end)| decode_entity(entity).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 2..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
