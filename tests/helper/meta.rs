//! Mock launcher meta server

use std::collections::HashMap;

use mockito::{Mock, Server, ServerGuard};
use serde_json::json;

use mcversion::config::ClientConfig;

/// Serves a manifest, a v2 manifest and one detail document per version
pub struct MetaServer {
    server: ServerGuard,
    versions: Vec<(String, String)>,
    manifest_mock: Option<Mock>,
    details: HashMap<String, Mock>,
    mocks: Vec<Mock>,
}

impl MetaServer {
    /// Starts a server listing `versions` as `(id, type)` pairs, newest first.
    /// The latest release and snapshot are the first of each type.
    pub async fn start(versions: &[(&str, &str)]) -> Self {
        let server = Server::new_async().await;
        let mut meta = Self {
            server,
            versions: versions
                .iter()
                .map(|(id, kind)| (id.to_string(), kind.to_string()))
                .collect(),
            manifest_mock: None,
            details: HashMap::new(),
            mocks: Vec::new(),
        };

        let body = meta.manifest_body();
        meta.manifest_mock = Some(meta.json_mock("/version_manifest.json", &body).await);

        let body = meta.manifest_v2_body();
        let v2 = meta.json_mock("/version_manifest_v2.json", &body).await;
        meta.mocks.push(v2);

        for (id, kind) in meta.versions.clone() {
            let mock = meta
                .json_mock(&Self::detail_path(&id), &detail_body(&id, &kind))
                .await;
            meta.details.insert(id, mock);
        }

        meta
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            concurrency: Some(4),
            ..ClientConfig::with_base_url(&self.server.url())
        }
    }

    /// Replaces the manifest endpoint's response
    pub async fn set_manifest_response(&mut self, status: usize, content_type: &str, body: &str) {
        if let Some(mock) = self.manifest_mock.take() {
            mock.remove_async().await;
        }
        let mock = self
            .server
            .mock("GET", "/version_manifest.json")
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await;
        self.manifest_mock = Some(mock);
    }

    /// Restores the manifest endpoint, listing only `ids`
    pub async fn serve_manifest_of(&mut self, ids: &[&str]) {
        let retained: Vec<_> = self
            .versions
            .iter()
            .filter(|(id, _)| ids.contains(&id.as_str()))
            .cloned()
            .collect();
        let body = manifest_json(&self.server.url(), &retained).to_string();
        self.set_manifest_response(200, "application/json", &body)
            .await;
    }

    /// Makes the detail endpoint of `id` respond with `status`
    pub async fn fail_detail(&mut self, id: &str, status: usize) {
        if let Some(mock) = self.details.remove(id) {
            mock.remove_async().await;
        }
        let mock = self
            .server
            .mock("GET", Self::detail_path(id).as_str())
            .with_status(status)
            .create_async()
            .await;
        self.details.insert(id.to_string(), mock);
    }

    pub fn ids(&self) -> Vec<String> {
        self.versions.iter().map(|(id, _)| id.clone()).collect()
    }

    fn detail_path(id: &str) -> String {
        format!("/v1/packages/{}.json", id)
    }

    fn manifest_body(&self) -> String {
        manifest_json(&self.server.url(), &self.versions).to_string()
    }

    fn manifest_v2_body(&self) -> String {
        let mut manifest = manifest_json(&self.server.url(), &self.versions);
        if let Some(entries) = manifest["versions"].as_array_mut() {
            for entry in entries {
                entry["sha1"] = json!("c98adde5094a3041f486b4d42d0386cf87310559");
                entry["complianceLevel"] = json!(1);
            }
        }
        manifest.to_string()
    }

    async fn json_mock(&mut self, path: &str, body: &str) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

fn manifest_json(base_url: &str, versions: &[(String, String)]) -> serde_json::Value {
    let latest = |kind: &str| {
        versions
            .iter()
            .find(|(_, k)| k == kind)
            .map(|(id, _)| id.clone())
            .unwrap_or_default()
    };
    json!({
        "latest": {"release": latest("release"), "snapshot": latest("snapshot")},
        "versions": versions
            .iter()
            .map(|(id, kind)| json!({
                "id": id,
                "type": kind,
                "url": format!("{}/v1/packages/{}.json", base_url, id),
                "time": "2024-01-15T09:41:29+00:00",
                "releaseTime": "2023-12-07T12:56:20+00:00"
            }))
            .collect::<Vec<_>>()
    })
}

fn detail_body(id: &str, kind: &str) -> String {
    json!({
        "id": id,
        "type": kind,
        "assets": "12",
        "assetIndex": {"id": "12", "sha1": "abc", "size": 1, "totalSize": 2, "url": "https://example.com/12.json"},
        "downloads": {"client": {"sha1": "c1", "size": 1, "url": "https://example.com/client.jar"}},
        "javaVersion": {"component": "java-runtime-gamma", "majorVersion": 17},
        "libraries": [{"name": "com.mojang:logging:1.1.1"}],
        "mainClass": "net.minecraft.client.main.Main",
        "minimumLauncherVersion": 21,
        "releaseTime": "2023-12-07T12:56:20+00:00",
        "time": "2023-12-07T12:56:20+00:00"
    })
    .to_string()
}
