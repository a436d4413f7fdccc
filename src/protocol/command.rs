#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    ParseTable,
    BuildIndex,
    InsertDividers,
    ExportCsv,
    ImportFile,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "parse_table" => Command::ParseTable,
            "build_index" => Command::BuildIndex,
            "insert_dividers" => Command::InsertDividers,
            "export_csv" => Command::ExportCsv,
            "import_file" => Command::ImportFile,
            _ => Command::Unknown,
        }
    }
}
