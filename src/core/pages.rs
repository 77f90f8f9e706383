// ============================================================================
// UEnergy i18n - 页面文件发现与读写
// ============================================================================
//
// 文件: src/core/pages.rs
// 职责: 收集待处理的 HTML 页面并负责读写
// 边界:
//   - ✅ 目录递归扫描（应用忽略模式）
//   - ✅ 页面读取解析与序列化写出
//   - ✅ 输出目录路径映射
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含终端输出
//
// ============================================================================

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::markup::{parse_document, to_html};
use crate::models::config::Config;
use crate::models::document::Document;

/// 待处理的页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// 页面路径
    pub path: PathBuf,
    /// 相对扫描起点的路径（单个文件时为文件名）
    pub relative: PathBuf,
}

impl PageEntry {
    /// 输出位置：给定输出目录时映射到其下，否则原地覆盖
    pub fn output_path(&self, out_dir: Option<&Path>) -> PathBuf {
        match out_dir {
            Some(dir) => dir.join(&self.relative),
            None => self.path.clone(),
        }
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// 收集输入路径下的页面文件
///
/// 文件直接收录；目录递归扫描 `.html`/`.htm`，命中 `pages.ignore` 的目录整体跳过。
pub fn discover_pages(inputs: &[PathBuf], config: &Config) -> Result<Vec<PageEntry>> {
    let mut pages = Vec::new();

    for input in inputs {
        if input.is_file() {
            let relative = input
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| input.clone());
            pages.push(PageEntry {
                path: input.clone(),
                relative,
            });
            continue;
        }
        if !input.is_dir() {
            anyhow::bail!("Path not found: {}", input.display());
        }

        for entry in WalkDir::new(input)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let relative_path = e
                    .path()
                    .strip_prefix(input)
                    .unwrap_or(e.path())
                    .to_string_lossy()
                    .replace('\\', "/");
                // 完全跳过，不进入子目录
                relative_path.is_empty() || !config.should_ignore_path(&relative_path)
            })
        {
            let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
            if !entry.file_type().is_file() || !is_page(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(input)
                .unwrap_or(entry.path())
                .to_path_buf();
            debug!(path = %entry.path().display(), "page discovered");
            pages.push(PageEntry {
                path: entry.path().to_path_buf(),
                relative,
            });
        }
    }

    Ok(pages)
}

/// 读取并解析页面
pub fn load_page(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = parse_document(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(doc)
}

/// 序列化页面并写出（自动创建父目录）
pub fn write_page(path: &Path, doc: &Document) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, to_html(doc)).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "<html></html>").unwrap();
    }

    #[test]
    fn test_discovery_skips_ignored_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "pages/profit.htm");
        touch(dir.path(), "pages/notes.txt");
        touch(dir.path(), "backups/index.html");
        touch(dir.path(), "vendor/chart.min.html");

        let pages = discover_pages(&[dir.path().to_path_buf()], &Config::default()).unwrap();
        let relative: Vec<String> = pages
            .iter()
            .map(|page| page.relative.to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(relative, vec!["index.html", "pages/profit.htm"]);
    }

    #[test]
    fn test_single_file_and_output_mapping() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "site/home.html");
        let file = dir.path().join("site/home.html");

        let pages = discover_pages(&[file.clone()], &Config::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].output_path(None), file);
        assert_eq!(
            pages[0].output_path(Some(Path::new("out"))),
            PathBuf::from("out/home.html")
        );
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_pages(&[missing], &Config::default()).is_err());
    }

    #[test]
    fn test_load_and_write_page() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.html");
        let doc = load_page(&dir.path().join("a.html")).unwrap();

        let target = dir.path().join("out/nested/a.html");
        write_page(&target, &doc).unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "<html></html>");
    }
}
