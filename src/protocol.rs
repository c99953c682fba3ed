use crate::error::{Result, TfiacError};
use crate::types::{DeviceStatus, SwingMode};
use quick_xml::de::DeError;
use serde::Deserialize;

const SWING_OFF: &str = "<WindDirection_H>off</WindDirection_H><WindDirection_V>off</WindDirection_V>";
const SWING_VERTICAL: &str = "<WindDirection_H>off</WindDirection_H><WindDirection_V>on</WindDirection_V>";
const SWING_HORIZONTAL: &str = "<WindDirection_H>on</WindDirection_H><WindDirection_V>off</WindDirection_V>";
const SWING_BOTH: &str = "<WindDirection_H>on</WindDirection_H><WindDirection_V>on</WindDirection_V>";

/// Build the status query envelope
pub fn build_status_query(seq: u64) -> String {
    format!(
        r#"<msg msgid="SyncStatusReq" type="Control" seq="{}"><SyncStatusReq></SyncStatusReq></msg>"#,
        seq
    )
}

/// Wrap a command body in the `SetMessage` envelope
pub fn build_set_envelope(seq: u64, body: &str) -> String {
    format!(
        r#"<msg msgid="SetMessage" type="Control" seq="{}"><SetMessage>{}</SetMessage></msg>"#,
        seq, body
    )
}

/// Render the full desired state carried by a `SetMessage`
///
/// The target temperature always keeps a decimal point (`75.0`), matching what the
/// device firmware expects.
pub fn build_update_body(status: &DeviceStatus) -> String {
    format!(
        "<TurnOn>{}</TurnOn><BaseMode>{}</BaseMode><SetTemp>{:?}</SetTemp><WindSpeed>{}</WindSpeed>",
        status.is_on, status.operation, status.target_temp, status.fan_mode
    )
}

/// Wind-direction fragment for a swing mode
pub fn build_swing_body(swing: SwingMode) -> &'static str {
    match swing {
        SwingMode::Off => SWING_OFF,
        SwingMode::Vertical => SWING_VERTICAL,
        SwingMode::Horizontal => SWING_HORIZONTAL,
        SwingMode::Both => SWING_BOTH,
    }
}

/// Reply envelope; only the status payload is of interest
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "statusUpdateMsg")]
    status_update_msg: Option<StatusUpdateMsg>,
}

/// Raw text children of `statusUpdateMsg`; presence is checked after deserializing
#[derive(Debug, Deserialize)]
struct StatusUpdateMsg {
    #[serde(rename = "DeviceName")]
    device_name: Option<String>,
    #[serde(rename = "IndoorTemp")]
    indoor_temp: Option<String>,
    #[serde(rename = "SetTemp")]
    set_temp: Option<String>,
    #[serde(rename = "BaseMode")]
    base_mode: Option<String>,
    #[serde(rename = "WindSpeed")]
    wind_speed: Option<String>,
    #[serde(rename = "TurnOn")]
    turn_on: Option<String>,
    #[serde(rename = "WindDirection_H")]
    wind_direction_h: Option<String>,
    #[serde(rename = "WindDirection_V")]
    wind_direction_v: Option<String>,
}

/// A parsed status reply
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub name: String,
    pub status: DeviceStatus,
}

/// Parse a status reply datagram
pub fn parse_status_response(raw: &[u8]) -> Result<StatusReport> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| TfiacError::Parse(format!("Reply is not valid UTF-8: {}", e)))?;

    // Serde-level complaints (duplicate or mistyped children) mean an incomplete
    // status, not broken XML
    let envelope: Envelope = quick_xml::de::from_str(text).map_err(|e| match e {
        DeError::Custom(detail) => TfiacError::Parse(detail),
        other => TfiacError::Xml(other),
    })?;
    let msg = envelope
        .status_update_msg
        .ok_or_else(|| TfiacError::Parse("No statusUpdateMsg in reply".to_string()))?;

    tracing::debug!("Current status {:?}", msg);

    let status = DeviceStatus {
        current_temp: parse_temp("IndoorTemp", required("IndoorTemp", &msg.indoor_temp)?)?,
        target_temp: parse_temp("SetTemp", required("SetTemp", &msg.set_temp)?)?,
        operation: required("BaseMode", &msg.base_mode)?
            .parse()
            .map_err(invalid_field("BaseMode"))?,
        fan_mode: required("WindSpeed", &msg.wind_speed)?
            .parse()
            .map_err(invalid_field("WindSpeed"))?,
        swing_mode: SwingMode::from_flags(
            required("WindDirection_H", &msg.wind_direction_h)? == "on",
            required("WindDirection_V", &msg.wind_direction_v)? == "on",
        ),
        is_on: required("TurnOn", &msg.turn_on)?
            .parse()
            .map_err(invalid_field("TurnOn"))?,
    };
    let name = required("DeviceName", &msg.device_name)?.to_string();

    Ok(StatusReport { name, status })
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| TfiacError::Parse(format!("Missing {} in reply", field)))
}

fn parse_temp(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| TfiacError::Parse(format!("{} is not a number: {:?}", field, value)))
}

fn invalid_field(field: &'static str) -> impl Fn(TfiacError) -> TfiacError {
    move |e| TfiacError::Parse(format!("{}: {}", field, e))
}
