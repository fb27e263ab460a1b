/// bcrypt work factor for password hashing
pub const BCRYPT_COST: u32 = 12;

/// Default radius in meters for the geospatial near-filter
pub const DEFAULT_NEAR_DISTANCE_METERS: f64 = 2000.0;

/// Maximum accepted report image size in bytes
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted for report images
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

pub fn is_image_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}
