use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use super::error::InfraError;

/// Read a whole input file, or stdin when no path (or `-`) is given.
pub fn read_source(path: Option<&Path>) -> Result<String, InfraError> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| InfraError::read_input(path, source))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn reads_named_file() {
        let mut file = NamedTempFile::new().expect("tmp file");
        file.write_all(b"A|B|C").expect("write source");

        let source = read_source(Some(file.path())).expect("readable");
        assert_eq!(source, "A|B|C");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_source(Some(Path::new("/nonexistent/quiz.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quiz.json"));
    }
}
