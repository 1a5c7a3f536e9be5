use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use simplecontrol_frame::{Frame, Payload, FRAME_SIZE};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One frame and, when decoded, the value it carries.
#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub frame: String,
    pub bytes: [u8; FRAME_SIZE],
    pub class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<f32>,
}

impl FrameReport {
    pub fn new(frame: &Frame, payload: Option<Payload>) -> Self {
        Self {
            frame: frame.to_string(),
            bytes: frame.into_bytes(),
            class: frame.classify().as_str(),
            kind: payload.map(|p| p.kind().as_str()),
            bits: payload.map(|p| format!("{:#010x}", p.to_bits())),
            address: payload.and_then(|p| p.as_address()),
            data: payload.and_then(|p| p.as_data()),
        }
    }

    fn value_text(&self) -> String {
        match (self.address, self.data) {
            (Some(address), _) => address.to_string(),
            (_, Some(data)) => data.to_string(),
            _ => "-".to_string(),
        }
    }
}

pub fn print_report(report: &FrameReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "CLASS", "KIND", "BITS", "VALUE"])
                .add_row(vec![
                    report.frame.clone(),
                    report.class.to_string(),
                    report.kind.unwrap_or("-").to_string(),
                    report.bits.clone().unwrap_or_else(|| "-".to_string()),
                    report.value_text(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "frame=[{}] class={} kind={} bits={} value={}",
                report.frame,
                report.class,
                report.kind.unwrap_or("-"),
                report.bits.as_deref().unwrap_or("-"),
                report.value_text()
            );
        }
        OutputFormat::Raw => {
            if report.kind.is_some() {
                println!("{}", report.value_text());
            } else {
                println!("{}", report.class);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use simplecontrol_frame::{encode_payload, Kind};

    use super::*;

    #[test]
    fn report_for_address_frame() {
        let payload = Payload::Address(0x1234_5678);
        let frame = encode_payload(&payload);
        let report = FrameReport::new(&frame, Some(payload));

        assert_eq!(report.frame, "f8 ac d1 91 f1");
        assert_eq!(report.class, "address");
        assert_eq!(report.kind, Some(Kind::Address.as_str()));
        assert_eq!(report.bits.as_deref(), Some("0x12345678"));
        assert_eq!(report.value_text(), "305419896");
    }

    #[test]
    fn invalid_report_omits_value_fields() {
        let report = FrameReport::new(&Frame::new(), None);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            "{\"frame\":\"00 00 00 00 00\",\"bytes\":[0,0,0,0,0],\"class\":\"invalid\"}"
        );
    }
}
