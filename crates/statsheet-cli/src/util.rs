use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use statsheet_dataset::generator::DatasetGenerator;
use statsheet_measure::{
    engine::MeasureEngine as _,
    worksheet::{Exercise, Worksheet},
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::open(path)?,
            None => Output::Stdout {
                writer: io::stdout().lock(),
            },
        };
        output.write_json(value)
    }

    fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Seeded generator when `seed` is given, otherwise a randomly seeded one.
#[must_use]
pub fn generator(seed: Option<u64>) -> DatasetGenerator {
    match seed {
        Some(seed) => DatasetGenerator::with_seed(seed),
        None => DatasetGenerator::new(),
    }
}

/// Loads an exercise file and builds its worksheet.
///
/// Generated exercises only reproduce the same table when given the same `seed`.
pub fn load_worksheet(path: &Path, seed: Option<u64>) -> anyhow::Result<Worksheet> {
    let exercise: Exercise = read_json_file("exercise", path)?;
    let mut generator = generator(seed);
    let worksheet = Worksheet::from_exercise(&exercise, generator.rng_mut()).with_context(|| {
        format!(
            "Failed to build worksheet for exercise {}",
            exercise.definition.code
        )
    })?;
    tracing::info!(
        measure = worksheet.engine().id(),
        rows = worksheet.expected_rows().len(),
        "built worksheet"
    );
    Ok(worksheet)
}
