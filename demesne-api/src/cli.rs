use clap::Parser;

use crate::upstream::DEFAULT_UPSTREAM_URL;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "DEMESNE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Base URL of the D&D 5e API
    #[arg(long, env = "DND_API_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Number of monsters and spells sampled per request
    #[arg(long, env = "DEMESNE_SAMPLE_SIZE", default_value_t = 10)]
    pub sample_size: usize,

    /// Serve built-in fixtures instead of calling the upstream API
    #[arg(long, env = "DEMESNE_USE_MOCK_DATA")]
    pub mock: bool,

    /// Allowed CORS origins, comma separated. Any origin is allowed when empty.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origin: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["demesne-api"]).unwrap();
        assert_eq!(args.port, 3001);
        assert_eq!(args.sample_size, 10);
        assert!(args.cors_origin.is_empty());
    }

    #[test]
    fn test_cors_origins_split_on_comma() {
        let args = Args::try_parse_from([
            "demesne-api",
            "--cors-origin",
            "http://localhost:5173,http://example.com",
            "--mock",
        ])
        .unwrap();
        assert_eq!(
            args.cors_origin,
            vec!["http://localhost:5173", "http://example.com"]
        );
        assert!(args.mock);
    }
}
