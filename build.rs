use serde_json::Value;
use std::fs;
use std::path::Path;

fn main() {
    // 翻译资源文件改变时重新运行 build script
    println!("cargo:rerun-if-changed=locales");

    let locales_dir = Path::new("locales");
    if !locales_dir.exists() {
        println!("cargo:warning=locales directory not found, bundled translations will be empty");
        return;
    }

    let entries = match fs::read_dir(locales_dir) {
        Ok(entries) => entries,
        Err(e) => {
            println!("cargo:warning=Failed to read locales directory: {}", e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        println!("cargo:rerun-if-changed={}", path.display());

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => panic!("Failed to read {}: {}", path.display(), e),
        };

        // 每个语言文件的根节点必须是对象，否则点分键无法查找
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(_)) => {}
            Ok(_) => panic!("{}: root must be a JSON object", path.display()),
            Err(e) => panic!("Failed to parse {}: {}", path.display(), e),
        }
    }
}
