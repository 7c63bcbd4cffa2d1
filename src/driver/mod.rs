//! Generation run: random vectors, then edge-case vectors, then the artifact.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use rand::CryptoRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    backend::Secp256k1Backend,
    digest::{fixed_digests, random_digest},
    error::Error,
    recorder::{Recorder, SignatureRecord},
    scalar::{MAX_SAMPLING_ATTEMPTS, edge_case_scalars, random_scalar},
};

pub const DEFAULT_RANDOM_COUNT: usize = 1000;
pub const ARTIFACT_FILE_NAME: &str = "libsecp256k1_vectors.json";

/// Where the artifact lands, relative to the crate root.
pub fn default_output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(ARTIFACT_FILE_NAME)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub random_count: usize,
    pub max_sampling_attempts: usize,
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            random_count: DEFAULT_RANDOM_COUNT,
            max_sampling_attempts: MAX_SAMPLING_ATTEMPTS,
            output_path: default_output_path(),
        }
    }
}

/// Records in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorSet {
    records: Vec<SignatureRecord>,
}

impl VectorSet {
    pub fn push(&mut self, record: SignatureRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SignatureRecord] {
        &self.records
    }

    /// Writes the set as a pretty-printed JSON array, creating parent directories.
    ///
    /// Output goes to a sibling `.tmp` file that is renamed over `path` only once
    /// fully flushed, so a failed write leaves any previous artifact intact.
    pub fn write_json(&self, path: &Path) -> Result<(), Error> {
        let failure = |source: std::io::Error| Error::SerializationFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(failure)?;
        }
        let staging = staging_path(path);
        if let Err(err) = self.write_staged(&staging) {
            let _ = fs::remove_file(&staging);
            return Err(failure(err));
        }
        fs::rename(&staging, path).map_err(failure)
    }

    fn write_staged(&self, staging: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(staging)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    pub fn read_json(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)
            .map_err(|e| Error::MalformedArtifact(format!("{}: {e}", path.display())))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::MalformedArtifact(format!("{}: {e}", path.display())))
    }

    /// Audits every record, stopping at the first failure.
    pub fn audit<B: Secp256k1Backend + ?Sized>(&self, backend: &B) -> Result<(), Error> {
        self.records
            .iter()
            .try_for_each(|record| record.audit(backend))
    }
}

/// Builds the full vector set. Any error aborts the run; nothing partial is returned.
pub fn generate<R, B>(config: &GeneratorConfig, rng: &mut R, backend: B) -> Result<VectorSet, Error>
where
    R: CryptoRng + ?Sized,
    B: Secp256k1Backend,
{
    let recorder = Recorder::new(backend);
    let mut vectors = VectorSet::default();

    info!(
        backend = recorder.backend().name(),
        count = config.random_count,
        "generating random vectors"
    );
    for _ in 0..config.random_count {
        let privkey = random_scalar(rng, config.max_sampling_attempts)?;
        let digest = random_digest(rng);
        vectors.push(recorder.record(&privkey, &digest)?);
    }

    let keys = edge_case_scalars();
    let digests = fixed_digests();
    info!(
        keys = keys.len(),
        digests = digests.len(),
        "generating edge-case vectors"
    );
    for privkey in &keys {
        for digest in &digests {
            vectors.push(recorder.record(privkey, digest)?);
        }
    }

    info!(total = vectors.len(), "generation complete");
    Ok(vectors)
}
