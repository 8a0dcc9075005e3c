/**
 * Avatars
 *
 * Two concerns: the gravatar-derived default URL assigned at signup,
 * and the upload pipeline that turns a multipart image into a fixed
 * 250x250 file under the public avatars directory.
 *
 * The pipeline stages through a `NamedTempFile`, so the temp file is
 * removed on every exit path. The caller treats the database update as
 * the commit point: `store_avatar` returns the destination path so the
 * file can be removed again if that update fails.
 */

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageFormat;
use md5::{Digest, Md5};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::error::ApiError;

/// Square avatar edge length in pixels
pub const AVATAR_SIZE: u32 = 250;

/// Default avatar for a fresh account, derived from the email address.
pub fn gravatar_url(email: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let digest = hasher.finalize();
    format!(
        "https://www.gravatar.com/avatar/{}?s={AVATAR_SIZE}&d=retro",
        hex::encode(digest)
    )
}

/// Result of a stored upload: the relative URL to persist and the file
/// to delete if persisting fails.
#[derive(Debug)]
pub struct StoredAvatar {
    pub url: String,
    pub path: PathBuf,
}

/// Run the upload pipeline for one image.
///
/// Writes `data` to a temp file, decodes it, stretches it to exactly
/// [`AVATAR_SIZE`]x[`AVATAR_SIZE`] (aspect ratio is not preserved),
/// overwrites the temp file with the resized image and copies it to
/// `<public_dir>/avatars/<user_id>.<ext>`. Decode and resize are CPU
/// work, so the whole sequence runs on a blocking thread.
///
/// Fails with 400 for an unsupported extension or an image that does
/// not decode; filesystem trouble surfaces as 500.
pub async fn store_avatar(
    public_dir: &Path,
    user_id: Uuid,
    original_name: &str,
    data: Vec<u8>,
) -> Result<StoredAvatar, ApiError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| ApiError::bad_request("avatar file has no extension"))?;
    let format = ImageFormat::from_extension(&extension)
        .ok_or_else(|| ApiError::bad_request("unsupported image type"))?;

    let file_name = format!("{user_id}.{extension}");
    let destination = public_dir.join("avatars").join(&file_name);

    let dest = destination.clone();
    tokio::task::spawn_blocking(move || -> Result<(), ApiError> {
        let temp = NamedTempFile::new()?;
        std::fs::write(temp.path(), &data)?;

        // the temp file has no extension, so sniff the format from content
        let decoded = image::ImageReader::open(temp.path())?
            .with_guessed_format()?
            .decode()
            .map_err(|_| ApiError::bad_request("file is not a valid image"))?;
        let resized = decoded.resize_exact(AVATAR_SIZE, AVATAR_SIZE, FilterType::Triangle);
        resized
            .save_with_format(temp.path(), format)
            .map_err(|e| ApiError::internal(format!("failed to encode avatar: {e}")))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // copy instead of rename: the temp dir may be on another filesystem
        std::fs::copy(temp.path(), &dest)?;
        Ok(())
    })
    .await
    .map_err(|e| ApiError::internal(format!("avatar task panicked: {e}")))??;

    Ok(StoredAvatar {
        url: format!("/avatars/{file_name}"),
        path: destination,
    })
}
