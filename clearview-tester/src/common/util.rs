use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/{ts}")
}

/// Save a screenshot, the DOM, the bridge state and the error chain for a
/// failed browser scenario.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let state = driver
        .execute(
            "return window.__clearviewTest && window.__clearviewTest.state && window.__clearviewTest.state()",
            vec![],
        )
        .await
        .ok()
        .map(|ret| ret.json().clone());
    let storage = driver
        .execute("return Object.assign({}, window.localStorage)", vec![])
        .await
        .ok()
        .map(|ret| ret.json().clone());
    let chain = format!("{err:#}");

    write_artifact_files(
        Path::new(dir),
        &ArtifactPayload {
            screenshot: screenshot.as_deref(),
            source: source.as_deref(),
            state: state.as_ref(),
            storage: storage.as_ref(),
            error_chain: &chain,
        },
    )
}

struct ArtifactPayload<'a> {
    screenshot: Option<&'a [u8]>,
    source: Option<&'a str>,
    state: Option<&'a serde_json::Value>,
    storage: Option<&'a serde_json::Value>,
    error_chain: &'a str,
}

fn write_artifact_files(dir: &Path, payload: &ArtifactPayload<'_>) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = payload.screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }

    if let Some(src) = payload.source {
        let _ = fs::write(dir.join("dom.html"), src);
    }

    let json_files = [
        ("state.json", payload.state),
        ("storage.json", payload.storage),
    ];
    for (name, value) in json_files {
        if let Some(json) = value {
            let bytes = serde_json::to_vec_pretty(json).unwrap_or_default();
            let _ = fs::write(dir.join(name), bytes);
        }
    }

    let _ = fs::write(dir.join("error.txt"), payload.error_chain);

    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" init, ,font,  images ");
        assert_eq!(parts, vec!["init", "font", "images"]);
    }

    #[test]
    fn artifacts_dir_includes_key_segments() {
        let dir = artifacts_dir("target/out", "chrome", "contrast");
        assert!(dir.starts_with("target/out/chrome/contrast/"));
    }

    #[test]
    fn write_artifact_files_writes_expected_payloads() {
        let base = std::env::temp_dir().join(format!(
            "clearview-artifacts-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let state = json!({ "font_scale": 140, "images_hidden": true });
        let storage = json!({ "accessibilityFontSize": "140" });
        write_artifact_files(
            &base,
            &ArtifactPayload {
                screenshot: Some(&[1, 2, 3]),
                source: Some("<html />"),
                state: Some(&state),
                storage: Some(&storage),
                error_chain: "boom",
            },
        )
        .expect("write artifacts");

        for file in [
            "screenshot.png",
            "dom.html",
            "state.json",
            "storage.json",
            "error.txt",
        ] {
            assert!(base.join(file).exists(), "{file} missing");
        }
        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn missing_payloads_only_write_the_error() {
        let dir_name = format!("clearview-artifacts-empty-{}", std::process::id());
        let base = std::env::temp_dir().join(dir_name);
        write_artifact_files(
            &base,
            &ArtifactPayload {
                screenshot: None,
                source: None,
                state: None,
                storage: None,
                error_chain: "no driver",
            },
        )
        .expect("write artifacts");
        assert!(base.join("error.txt").exists());
        assert!(!base.join("dom.html").exists());
        let _ = fs::remove_dir_all(base);
    }
}
