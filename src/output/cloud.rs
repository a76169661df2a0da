//! Cloud storage destinations (S3, R2, GCS, Azure, local)

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;
use tracing::debug;

/// Storage location parsed from URL
#[derive(Debug, Clone)]
pub struct CloudDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Bucket, container or local root directory; empty for in-process stores
    root: String,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl CloudDestination {
    /// Parse a destination URL and create appropriate object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(rest) = url.strip_prefix("s3://") {
            Self::parse_s3(rest, false)
        } else if let Some(rest) = url.strip_prefix("r2://") {
            Self::parse_s3(rest, true)
        } else if let Some(rest) = url.strip_prefix("gs://") {
            Self::parse_gcs(rest)
        } else if let Some(rest) = url.strip_prefix("az://") {
            Self::parse_azure(rest)
        } else {
            Self::parse_local(url)
        }
    }

    /// Wrap an already constructed store
    pub fn from_store(store: Arc<dyn ObjectStore>, scheme: impl Into<String>) -> Self {
        Self {
            store,
            root: String::new(),
            prefix: String::new(),
            scheme: scheme.into(),
        }
    }

    /// In-process store, mainly for tests and dry runs
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemory::new()), "memory")
    }

    /// Split `bucket/prefix` into its parts
    fn split_bucket(without_scheme: &str) -> Result<(&str, String)> {
        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };
        if bucket.is_empty() {
            return Err(Error::config("Storage URL is missing a bucket name"));
        }
        Ok((bucket, prefix))
    }

    /// Parse S3 or R2 URL
    fn parse_s3(without_scheme: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = Self::split_bucket(without_scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // AWS_ENDPOINT is read by from_env(); R2 also accepts its own variable
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root: bucket.to_string(),
            prefix,
            scheme: scheme.to_string(),
        })
    }

    /// Parse GCS URL
    fn parse_gcs(without_scheme: &str) -> Result<Self> {
        let (bucket, prefix) = Self::split_bucket(without_scheme)?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root: bucket.to_string(),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(without_scheme: &str) -> Result<Self> {
        let (container, prefix) = Self::split_bucket(without_scheme)?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root: container.to_string(),
            prefix,
            scheme: "az".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root: path.trim_end_matches('/').to_string(),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local or in-memory)
    pub fn is_cloud(&self) -> bool {
        !matches!(self.scheme.as_str(), "file" | "memory")
    }

    /// Get the scheme (s3, r2, gs, az, file, memory)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    fn object_path(&self, filename: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix))
        }
    }

    /// Full location of an object, e.g. `s3://bucket/prefix/file.csv`
    pub fn location(&self, filename: &str) -> String {
        let path = self.object_path(filename);
        if self.root.is_empty() {
            format!("{}://{path}", self.scheme)
        } else {
            format!("{}://{}/{path}", self.scheme, self.root)
        }
    }

    /// Write bytes to a file in the destination, replacing any existing object
    pub async fn write(&self, filename: &str, data: Bytes) -> Result<String> {
        self.write_with_type(filename, data, None).await
    }

    /// Write bytes tagged with a content type
    ///
    /// The content type is only attached on cloud stores; the local
    /// filesystem store cannot persist attributes.
    pub async fn write_with_type(
        &self,
        filename: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String> {
        let path = self.object_path(filename);
        let size = data.len();

        let mut opts = PutOptions::default();
        if let (Some(content_type), true) = (content_type, self.is_cloud()) {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
            opts.attributes = attributes;
        }

        self.store
            .put_opts(&path, PutPayload::from(data), opts)
            .await
            .map_err(|e| Error::storage(format!("Failed to write {path}: {e}")))?;

        let full_path = self.location(filename);
        debug!("Wrote {size} bytes to {full_path}");
        Ok(full_path)
    }

    /// Read a whole object
    pub async fn read(&self, filename: &str) -> Result<Bytes> {
        let path = self.object_path(filename);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| Error::storage(format!("Failed to read {path}: {e}")))?;
        result
            .bytes()
            .await
            .map_err(|e| Error::storage(format!("Failed to read {path}: {e}")))
    }

    /// Check whether an object exists
    pub async fn exists(&self, filename: &str) -> Result<bool> {
        match self.store.head(&self.object_path(filename)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Error::storage(format!("Failed to stat {filename}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out");
        let dest = CloudDestination::parse(path.to_str().unwrap()).unwrap();
        assert_eq!(dest.scheme(), "file");
        assert!(!dest.is_cloud());
        assert!(path.exists());
    }

    #[test]
    fn test_parse_s3_without_bucket_fails() {
        let err = CloudDestination::parse("s3://").unwrap_err();
        assert!(err.to_string().contains("bucket"));
    }

    #[test]
    fn test_location_names_bucket_and_prefix() {
        let dest = CloudDestination::parse("s3://movie-s3-1").unwrap();
        assert_eq!(dest.location("top_movies.csv"), "s3://movie-s3-1/top_movies.csv");

        let dest = CloudDestination::parse("r2://movie-charts/exports/2023/").unwrap();
        assert_eq!(
            dest.location("genre_vs_avg_popularity.png"),
            "r2://movie-charts/exports/2023/genre_vs_avg_popularity.png"
        );
    }

    #[tokio::test]
    async fn test_local_write_reports_root_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("movie-s3-1");
        let dest = CloudDestination::parse(root.to_str().unwrap()).unwrap();

        let location = dest
            .write("top_movies.csv", Bytes::from_static(b"csv"))
            .await
            .unwrap();
        assert_eq!(
            location,
            format!("file://{}/top_movies.csv", root.display())
        );
    }

    #[test]
    fn test_split_bucket_prefix() {
        let (bucket, prefix) = CloudDestination::split_bucket("movies/charts/2023/").unwrap();
        assert_eq!(bucket, "movies");
        assert_eq!(prefix, "charts/2023");
    }

    #[tokio::test]
    async fn test_in_memory_roundtrip_and_overwrite() {
        let dest = CloudDestination::in_memory();
        assert!(!dest.is_cloud());
        assert!(!dest.exists("top_movies.csv").await.unwrap());

        let path = dest
            .write("top_movies.csv", Bytes::from_static(b"first"))
            .await
            .unwrap();
        assert_eq!(path, "memory://top_movies.csv");

        dest.write("top_movies.csv", Bytes::from_static(b"second"))
            .await
            .unwrap();
        assert_eq!(dest.read("top_movies.csv").await.unwrap(), "second");
        assert!(dest.exists("top_movies.csv").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_write_with_type_ignores_attributes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = CloudDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();

        dest.write_with_type("chart.png", Bytes::from_static(b"png"), Some("image/png"))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read(temp_dir.path().join("chart.png")).unwrap(),
            b"png"
        );
    }

    #[tokio::test]
    async fn test_read_missing_object_fails() {
        let dest = CloudDestination::in_memory();
        let err = dest.read("nope.csv").await.unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
