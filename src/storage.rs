//! Browser persistence: local storage, JSON download and file import.

use log::{info, warn};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Storage, Url};

use crate::network::persistence::{self, Stamp};
use crate::network::{Catalog, Graph, NetworkConfig, NetworkError};

/// Failures at the browser boundary.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("browser storage is unavailable")]
	Unavailable,
	#[error("browser call failed: {0}")]
	Js(String),
	#[error(transparent)]
	Network(#[from] NetworkError),
}

impl From<JsValue> for StorageError {
	fn from(value: JsValue) -> Self {
		StorageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

type Result<T> = std::result::Result<T, StorageError>;

fn local_storage() -> Result<Storage> {
	web_sys::window()
		.ok_or(StorageError::Unavailable)?
		.local_storage()?
		.ok_or(StorageError::Unavailable)
}

/// ISO-8601 timestamp from the browser clock.
fn now_iso() -> String {
	js_sys::Date::new_0().to_iso_string().into()
}

pub fn save(graph: &Graph, config: &NetworkConfig) -> Result<()> {
	let stamp = now_iso();
	let json = persistence::to_json(graph, Stamp::Saved(&stamp))?;
	local_storage()?.set_item(&config.storage.network_key, &json)?;
	info!("saved network to local storage ({} bytes)", json.len());
	Ok(())
}

/// `Ok(None)` when nothing has been saved yet.
pub fn load(config: &NetworkConfig, catalog: &Catalog) -> Result<Option<Graph>> {
	let Some(json) = local_storage()?.get_item(&config.storage.network_key)? else {
		return Ok(None);
	};
	Ok(Some(persistence::from_json(&json, catalog)?))
}

/// Settings stored under the settings key, or defaults.
pub fn load_config() -> NetworkConfig {
	let defaults = NetworkConfig::default();
	let stored = local_storage()
		.ok()
		.and_then(|s| s.get_item(&defaults.storage.settings_key).ok().flatten());
	match stored.map(|json| NetworkConfig::from_json(&json)) {
		Some(Ok(config)) => config,
		Some(Err(err)) => {
			warn!("ignoring stored settings: {err}");
			defaults
		}
		None => defaults,
	}
}

pub fn save_config(config: &NetworkConfig) -> Result<()> {
	local_storage()?.set_item(&config.storage.settings_key, &config.to_json()?)?;
	Ok(())
}

/// Offers the network as `<prefix>-YYYY-MM-DD.json`.
pub fn export(graph: &Graph, config: &NetworkConfig) -> Result<()> {
	let stamp = now_iso();
	let json = persistence::to_json_pretty(graph, Stamp::Exported(&stamp))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(&json));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(StorageError::Unavailable)?;
	let body = document.body().ok_or(StorageError::Unavailable)?;
	let link: HtmlAnchorElement = document.create_element("a")?.unchecked_into();
	link.set_href(&url);
	link.set_download(&format!(
		"{}-{}.json",
		config.storage.export_prefix,
		stamp.get(..10).unwrap_or(&stamp)
	));
	body.append_child(&link)?;
	link.click();
	body.remove_child(&link)?;
	Url::revoke_object_url(&url)?;
	info!("exported network with {} nodes", graph.nodes().len());
	Ok(())
}

/// Reads and validates a user-chosen JSON file.
pub async fn import(file: File, catalog: &Catalog) -> Result<Graph> {
	let text = JsFuture::from(file.text()).await?;
	let json = text.as_string().ok_or_else(|| StorageError::Js("file is not text".to_string()))?;
	Ok(persistence::from_json(&json, catalog)?)
}
