use crate::{data_structures::texture, error::SceneError};

#[cfg(target_arch = "wasm32")]
fn format_url(asset_dir: &str, file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| SceneError::asset(file_name, "no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| SceneError::asset(file_name, "page origin unavailable"))?;
    let base = reqwest::Url::parse(&format!("{}/{}/", origin, asset_dir.trim_matches('/')))
        .map_err(|e| SceneError::asset(file_name, e))?;
    Ok(base
        .join(file_name)
        .map_err(|e| SceneError::asset(file_name, e))?)
}

/// Reads `file_name` from the asset root: a directory on native, `<origin>/<asset_dir>/` on the web.
pub async fn load_binary(asset_dir: &str, file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(asset_dir, file_name)?;
        let response = reqwest::get(url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SceneError::asset(file_name, e))?;
        response
            .bytes()
            .await
            .map_err(|e| SceneError::asset(file_name, e))?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new(asset_dir).join(file_name);
        tokio::fs::read(&path)
            .await
            .map_err(|e| SceneError::asset(file_name, format!("{}: {e}", path.display())))?
    };

    log::info!("Loaded {file_name} ({} bytes)", data.len());
    Ok(data)
}

/// Loads an sRGB colour texture such as the baked lighting map.
pub async fn load_texture(
    asset_dir: &str,
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(asset_dir, file_name).await?;
    let format = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, file_name, format, true)
        .map_err(|e| SceneError::asset(file_name, e).into())
}
