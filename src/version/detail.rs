//! Per-version detail document
//!
//! The resolution layer only looks at `id` and `kind`; everything else is
//! carried through for callers. Every field defaults when absent so that
//! legacy documents (no `arguments`, no `javaVersion`) decode.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::version::types::VersionKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionDetail {
    pub arguments: Option<Arguments>,
    /// Pre-1.13 launch arguments as a single template string
    pub minecraft_arguments: Option<String>,
    pub asset_index: AssetIndex,
    pub assets: String,
    pub compliance_level: i32,
    pub downloads: Downloads,
    pub id: String,
    pub java_version: Option<JavaVersion>,
    pub libraries: Vec<Library>,
    pub logging: Option<Logging>,
    pub main_class: String,
    pub minimum_launcher_version: i32,
    pub release_time: DateTime<Utc>,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: VersionKind,
}

/// Game and JVM arguments; entries are plain strings or rule-guarded objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arguments {
    pub game: Vec<serde_json::Value>,
    pub jvm: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetIndex {
    pub id: String,
    pub sha1: String,
    pub size: u64,
    pub total_size: u64,
    pub url: String,
}

/// A downloadable file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Download {
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Downloads {
    pub client: Option<Download>,
    pub client_mappings: Option<Download>,
    pub server: Option<Download>,
    pub server_mappings: Option<Download>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaVersion {
    pub component: String,
    pub major_version: u32,
}

/// A library artifact with an optional repository path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    pub path: Option<String>,
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryDownloads {
    pub artifact: Option<Artifact>,
    /// Native classifiers (e.g. `natives-linux`) of legacy libraries
    pub classifiers: Option<HashMap<String, Artifact>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Library {
    pub name: String,
    pub downloads: LibraryDownloads,
    pub rules: Vec<Rule>,
    pub natives: Option<HashMap<String, String>>,
    pub extract: Option<Extract>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub action: String,
    pub os: Option<OsRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsRule {
    pub name: Option<String>,
    pub version: Option<String>,
    pub arch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extract {
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub client: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub argument: String,
    pub file: LoggingFile,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingFile {
    pub id: String,
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: &str = r#"{
        "arguments": {
            "game": ["--username", "${auth_player_name}"],
            "jvm": [{"rules": [{"action": "allow", "os": {"name": "osx"}}], "value": "-XstartOnFirstThread"}]
        },
        "assetIndex": {"id": "12", "sha1": "abc", "size": 10, "totalSize": 20, "url": "https://example.com/12.json"},
        "assets": "12",
        "complianceLevel": 1,
        "downloads": {
            "client": {"sha1": "c1", "size": 1, "url": "https://example.com/client.jar"},
            "server": {"sha1": "s1", "size": 2, "url": "https://example.com/server.jar"}
        },
        "id": "1.20.4",
        "javaVersion": {"component": "java-runtime-gamma", "majorVersion": 17},
        "libraries": [
            {
                "downloads": {"artifact": {"path": "a/b.jar", "sha1": "l1", "size": 3, "url": "https://example.com/b.jar"}},
                "name": "a:b:1.0",
                "rules": [{"action": "allow", "os": {"name": "linux"}}]
            }
        ],
        "logging": {
            "client": {
                "argument": "-Dlog4j.configurationFile=${path}",
                "file": {"id": "client-1.12.xml", "sha1": "x", "size": 4, "url": "https://example.com/log.xml"},
                "type": "log4j2-xml"
            }
        },
        "mainClass": "net.minecraft.client.main.Main",
        "minimumLauncherVersion": 21,
        "releaseTime": "2023-12-07T12:56:20+00:00",
        "time": "2023-12-07T12:56:20+00:00",
        "type": "release"
    }"#;

    const LEGACY: &str = r#"{
        "id": "b1.7.3",
        "minecraftArguments": "${auth_player_name} ${auth_session}",
        "libraries": [
            {
                "name": "org.lwjgl:lwjgl-platform:2.9.0",
                "downloads": {"classifiers": {"natives-linux": {"path": "n.jar", "sha1": "n", "size": 5, "url": "https://example.com/n.jar"}}},
                "natives": {"linux": "natives-linux"},
                "extract": {"exclude": ["META-INF/"]}
            }
        ],
        "mainClass": "net.minecraft.launchwrapper.Launch",
        "releaseTime": "2011-07-07T22:00:00+00:00",
        "time": "2011-07-07T22:00:00+00:00",
        "type": "old_beta"
    }"#;

    #[test]
    fn decodes_modern_document() {
        let detail: VersionDetail = serde_json::from_str(MODERN).unwrap();

        assert_eq!(detail.id, "1.20.4");
        assert_eq!(detail.kind, VersionKind::Release);
        assert_eq!(detail.arguments.as_ref().map(|a| a.game.len()), Some(2));
        assert_eq!(detail.java_version.as_ref().map(|j| j.major_version), Some(17));
        assert_eq!(detail.downloads.client.as_ref().map(|d| d.size), Some(1));
        assert!(detail.downloads.client_mappings.is_none());
        assert_eq!(detail.libraries[0].rules[0].action, "allow");
        assert_eq!(
            detail.logging.and_then(|l| l.client).map(|c| c.kind),
            Some("log4j2-xml".to_string())
        );
    }

    #[test]
    fn decodes_legacy_document_without_arguments() {
        let detail: VersionDetail = serde_json::from_str(LEGACY).unwrap();

        assert_eq!(detail.kind, VersionKind::OldBeta);
        assert!(detail.arguments.is_none());
        assert!(detail.java_version.is_none());
        assert!(detail.minecraft_arguments.is_some());
        let natives = detail.libraries[0].downloads.classifiers.as_ref().unwrap();
        assert!(natives.contains_key("natives-linux"));
    }

    #[test]
    fn in_place_decode_leaves_no_stale_fields() {
        let mut detail: VersionDetail = serde_json::from_str(MODERN).unwrap();
        let libraries = detail.libraries.as_ptr();

        let mut de = serde_json::Deserializer::from_str(LEGACY);
        VersionDetail::deserialize_in_place(&mut de, &mut detail).unwrap();
        de.end().unwrap();

        assert_eq!(detail, serde_json::from_str::<VersionDetail>(LEGACY).unwrap());
        assert_eq!(detail.libraries.as_ptr(), libraries);
    }
}
