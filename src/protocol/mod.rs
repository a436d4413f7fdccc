use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{CoreError, Result};
use crate::model::entry::Entry;
use crate::model::meta::IndexMeta;
use crate::model::options::PipelineOptions;
use crate::model::row::RawRow;
use crate::parsers::table;
use crate::services::pipeline::IndexSession;
use crate::services::{dividers, encoding, export, pipeline};

mod command;
pub use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn field<T: DeserializeOwned>(payload: &Value, name: &'static str) -> Result<T> {
    let value = payload
        .get(name)
        .filter(|v| !v.is_null())
        .cloned()
        .ok_or(CoreError::MissingField(name))?;

    serde_json::from_value(value).map_err(|e| CoreError::InvalidPayload {
        field: name,
        message: e.to_string(),
    })
}

fn optional_field<T: DeserializeOwned>(payload: &Value, name: &'static str) -> Result<Option<T>> {
    match field(payload, name) {
        Ok(v) => Ok(Some(v)),
        Err(CoreError::MissingField(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn text_of(payload: &Value) -> &str {
    payload.get("text").and_then(|v| v.as_str()).unwrap_or("")
}

fn options_of(payload: &Value) -> Result<PipelineOptions> {
    Ok(optional_field(payload, "options")?.unwrap_or_default())
}

fn session_json(session: IndexSession) -> Value {
    json!({
        "items": session.items,
        "rows": session.original_rows,
        "meta": session.meta,
        "format": session.format,
        "has_header": session.has_header,
        "report": session.report
    })
}

fn dispatch(cmd: Command, payload: &Value) -> Result<Value> {
    match cmd {
        Command::Ping => Ok(json!({ "message": "index-core alive" })),

        Command::ParseTable => {
            let options = options_of(payload)?;
            let parsed = table::parse(text_of(payload), &options);
            Ok(json!({
                "rows": parsed.rows,
                "meta": parsed.meta,
                "format": parsed.format,
                "has_header": parsed.has_header
            }))
        }

        Command::BuildIndex => {
            let options = options_of(payload)?;
            let session = pipeline::run(text_of(payload), &options);
            Ok(session_json(session))
        }

        Command::InsertDividers => {
            let entries: Vec<Entry> = field(payload, "entries")?;
            Ok(json!({ "items": dividers::insert(&entries) }))
        }

        Command::ExportCsv => {
            let rows: Vec<RawRow> = field(payload, "rows")?;
            let meta: Option<IndexMeta> = optional_field(payload, "meta")?;
            let text = export::to_csv(&rows, meta.as_ref())?;
            Ok(json!({ "text": text }))
        }

        Command::ImportFile => {
            let path: String = field(payload, "path")?;
            if path.trim().is_empty() {
                return Err(CoreError::MissingField("path"));
            }
            let options = options_of(payload)?;

            let decoded = encoding::read_text(Path::new(&path))?;
            let session = pipeline::run(&decoded.text, &options);

            let mut out = session_json(session);
            out["encoding"] = json!(decoded.encoding);
            out["text"] = json!(decoded.text);
            Ok(out)
        }

        Command::Unknown => Err(CoreError::UnknownCommand),
    }
}

/// Handles one request line and returns one response line.
pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("rejecting request: {e}");
            return json!({
                "status": "error",
                "message": CoreError::from(e).to_string()
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd = Command::from(get_cmd(&req));

    match dispatch(cmd, get_payload(&req)) {
        Ok(payload) => ok(id, payload),
        Err(e) => {
            log::warn!("{cmd:?} failed: {e}");
            err(id, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(req: Value) -> Value {
        serde_json::from_str(&handle(&req.to_string())).unwrap()
    }

    #[test]
    fn ping() {
        let resp = call(json!({ "id": 1, "cmd": "ping" }));
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["status"], "ok");
    }

    #[test]
    fn invalid_json_and_unknown_command() {
        let resp: Value = serde_json::from_str(&handle("{nope")).unwrap();
        assert_eq!(resp["message"], "invalid json");

        let resp = call(json!({ "id": "x", "cmd": "frobnicate" }));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn build_index_returns_entries_and_rows() {
        let resp = call(json!({
            "id": 2,
            "cmd": "build_index",
            "payload": {
                "text": "term,sub-term,notes,book,page\nacl,,,1,\"9, 4\"\n",
                "options": { "dividers": true }
            }
        }));

        let payload = &resp["payload"];
        assert_eq!(payload["format"], "csv");
        assert_eq!(payload["items"][0]["divider"], "A");
        assert_eq!(payload["items"][1]["page"], "4, 9");
        assert_eq!(payload["rows"][0]["page"], "9, 4");
        assert_eq!(payload["report"]["entries"], 1);
    }

    #[test]
    fn export_requires_rows() {
        let resp = call(json!({ "id": 3, "cmd": "export_csv", "payload": {} }));
        assert_eq!(resp["message"], "payload.rows is required");
    }

    #[test]
    fn bad_options_are_reported() {
        let resp = call(json!({
            "cmd": "parse_table",
            "payload": { "text": "", "options": { "format": "xlsx" } }
        }));
        assert_eq!(resp["status"], "error");
        assert!(resp["message"].as_str().unwrap().starts_with("invalid payload.options"));
    }

    #[test]
    fn insert_dividers_from_entries() {
        let resp = call(json!({
            "cmd": "insert_dividers",
            "payload": { "entries": [
                { "term": "acl", "subTerm": "", "notes": "", "book": 1, "page": "4" },
                { "term": "dns", "subTerm": "", "notes": "", "book": 1, "page": "5" }
            ] }
        }));
        let items = resp["payload"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[2]["divider"], "D");
    }
}
