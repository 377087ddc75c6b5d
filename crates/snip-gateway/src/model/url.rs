use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snip_core::{ShortenError, ShortenRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenBody {
    #[serde(default)]
    pub long_url: String,
    pub shortcode: Option<String>,
    /// Minutes; kept loose so a non-integer is reported as invalid validity.
    pub validity: Option<Value>,
}

impl ShortenBody {
    fn validity_minutes(&self) -> Result<Option<i64>, ShortenError> {
        match &self.validity {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
                ShortenError::InvalidValidity(format!("validity must be a whole number of minutes, got {n}"))
            }),
            Some(other) => Err(ShortenError::InvalidValidity(format!(
                "validity must be a whole number of minutes, got {other}"
            ))),
        }
    }

    pub fn into_request(self) -> Result<ShortenRequest, ShortenError> {
        let validity = self.validity_minutes()?;

        let mut request = ShortenRequest::new(self.long_url);
        // an empty code means "pick one for me"
        if let Some(code) = self.shortcode.filter(|code| !code.trim().is_empty()) {
            request = request.with_custom_code(code);
        }
        if let Some(minutes) = validity {
            request = request.with_validity_minutes(minutes);
        }
        Ok(request)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub shortcode: String,
    pub short_url: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub long_url: String,
    pub expires_at: Timestamp,
}
