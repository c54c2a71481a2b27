use crate::browser;
use anyhow::{anyhow, Result};
use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

/// Name the desktop shell looks the bridge up under, `window.hostAPI`
pub const BRIDGE_NAME: &str = "hostAPI";

/// Surface a desktop wrapper can call into
/// - exposes no operations yet
/// - frozen, page scripts cannot add to it
pub fn expose() -> Result<Object> {
    let api = Object::freeze(&Object::new());
    let window: JsValue = browser::window()?.into();
    let installed = Reflect::set(&window, &JsValue::from_str(BRIDGE_NAME), &api)
    .map_err(|err| anyhow!("Could not expose {} : {:#?}", BRIDGE_NAME, err))?;
    if !installed {
        return Err(anyhow!("window.{} is read-only", BRIDGE_NAME));
    }
    Ok(api)
}
