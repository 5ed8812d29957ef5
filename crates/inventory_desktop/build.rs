use std::fs;
use std::path::PathBuf;

const SUPPORTED_SCHEMA: i64 = 1;

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: toml::Value = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    let schema = config
        .get("schema_version")
        .and_then(toml::Value::as_integer)
        .unwrap_or_else(|| panic!("{} is missing schema_version", path.display()));
    if schema != SUPPORTED_SCHEMA {
        panic!(
            "desktop config schema mismatch in {}: expected {SUPPORTED_SCHEMA} found {schema}",
            path.display()
        );
    }

    let json = serde_json::to_string_pretty(&config).expect("serialize desktop config");
    let generated = format!(
        "/// Build-time generated desktop configuration JSON.\n\
pub const DESKTOP_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
