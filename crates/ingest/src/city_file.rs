use serde_json::Value;

/// One landmark entry as it appears in a city file, before normalization.
///
/// Field handling is lenient by design: the only structural requirement is
/// that the entry is a JSON object. Everything else degrades quietly
/// (missing strings to `None`, missing coordinates to `NaN`, malformed
/// `experiencetag` to an empty list). The canonical-record policy decisions
/// (legacy `type` fallback, id derivation) live in the normalize module.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLandmark {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub typetag: Option<String>,
    /// Older city files spell the classification field `type`.
    pub legacy_type: Option<String>,
    pub experiencetag: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityFile {
    pub city: String,
    pub landmarks: Vec<RawLandmark>,
}

#[derive(Debug)]
pub enum CityFileError {
    NotACityFile,
    InvalidLandmark { index: usize, reason: String },
}

impl std::fmt::Display for CityFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityFileError::NotACityFile => {
                write!(f, "expected a city document with `city` and `landmarks`")
            }
            CityFileError::InvalidLandmark { index, reason } => {
                write!(f, "invalid landmark at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for CityFileError {}

impl CityFile {
    pub fn from_json_str(payload: &str) -> Result<Self, CityFileError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| CityFileError::InvalidLandmark {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, CityFileError> {
        let obj = value.as_object().ok_or(CityFileError::NotACityFile)?;

        let city = obj
            .get("city")
            .and_then(|v| v.as_str())
            .ok_or(CityFileError::NotACityFile)?
            .to_string();

        let landmarks_val = obj
            .get("landmarks")
            .and_then(|v| v.as_array())
            .ok_or(CityFileError::NotACityFile)?;

        let mut landmarks = Vec::with_capacity(landmarks_val.len());
        for (index, entry) in landmarks_val.iter().enumerate() {
            let entry = entry
                .as_object()
                .ok_or(CityFileError::InvalidLandmark {
                    index,
                    reason: "landmark must be an object".to_string(),
                })?;

            landmarks.push(RawLandmark {
                id: id_field(entry.get("id")),
                name: string_field(entry.get("name")),
                description: string_field(entry.get("description")),
                address: string_field(entry.get("address")),
                website: string_field(entry.get("website")),
                latitude: number_field(entry.get("latitude")),
                longitude: number_field(entry.get("longitude")),
                typetag: string_field(entry.get("typetag")),
                legacy_type: string_field(entry.get("type")),
                experiencetag: tag_list_field(entry.get("experiencetag")),
            });
        }

        Ok(Self { city, landmarks })
    }
}

fn id_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn number_field(value: Option<&Value>) -> f64 {
    value.and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
}

/// Accepts only a list shape; anything else degrades to empty. Non-string
/// members are skipped rather than stringified.
fn tag_list_field(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}
