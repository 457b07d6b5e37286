//! Avatar URL derivation.

/// Derives an avatar URL from an email address. Must be pure and total.
pub trait AvatarUrlGenerator: Send + Sync {
    fn generate_url(&self, email: &str) -> String;
}

/// Settings for [`GravatarUrlGenerator`].
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    pub base_url: String,
    /// Pixel size requested from the avatar service.
    pub size: u32,
    /// Fallback image when no avatar is registered: a keyword such as
    /// `identicon` or an image URL. Percent-encoded into the query.
    pub default_image: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.gravatar.com/avatar".to_string(),
            size: 200,
            default_image: "identicon".to_string(),
        }
    }
}

/// Gravatar-style URLs: MD5 of the trimmed, lowercased email.
#[derive(Debug, Clone, Default)]
pub struct GravatarUrlGenerator {
    config: AvatarConfig,
}

impl GravatarUrlGenerator {
    pub fn new(mut config: AvatarConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config }
    }

    /// Hex digest identifying an email address.
    pub fn email_hash(email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        format!("{:x}", md5::compute(normalized.as_bytes()))
    }
}

impl AvatarUrlGenerator for GravatarUrlGenerator {
    fn generate_url(&self, email: &str) -> String {
        format!(
            "{}/{}?s={}&d={}",
            self.config.base_url,
            Self::email_hash(email),
            self.config.size,
            urlencoding::encode(&self.config.default_image)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_hash_known_value() {
        // Reference value from Gravatar's documentation.
        assert_eq!(
            GravatarUrlGenerator::email_hash("MyEmailAddress@example.com "),
            "0bc83cb571cd1c50ba6f3e8a78ef1346"
        );
    }

    #[test]
    fn test_generate_url_default_config() {
        let generator = GravatarUrlGenerator::default();
        assert_eq!(
            generator.generate_url("myemailaddress@example.com"),
            "https://www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=200&d=identicon"
        );
    }

    #[test]
    fn test_url_default_image_is_encoded() {
        let generator = GravatarUrlGenerator::new(AvatarConfig {
            default_image: "https://example.com/images/avatar.jpg?v=1&x=2".to_string(),
            ..AvatarConfig::default()
        });

        let url = generator.generate_url("a@x.com");
        assert_eq!(
            url,
            "https://www.gravatar.com/avatar/743173788aa9166801df2e18f0e7ff24?s=200\
             &d=https%3A%2F%2Fexample.com%2Fimages%2Favatar.jpg%3Fv%3D1%26x%3D2"
        );
    }

    #[test]
    fn test_generate_url_is_deterministic() {
        let generator = GravatarUrlGenerator::new(AvatarConfig {
            base_url: "https://avatars.example.com/".to_string(),
            size: 64,
            default_image: "retro".to_string(),
        });
        let first = generator.generate_url("a@x.com");
        let second = generator.generate_url("A@X.com");
        assert_eq!(first, second);
        assert!(first.starts_with("https://avatars.example.com/"));
        assert!(first.ends_with("?s=64&d=retro"));
    }
}
