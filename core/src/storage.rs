use std::fs;
use std::path::Path;

use ron::de::from_str;
use ron::ser::{to_string_pretty, PrettyConfig};
use tracing::{debug, info};

use crate::error::StorageAction;
use crate::model::RegisteredPrinter;
use crate::targets;
use crate::Error;

pub fn load_printers(path: impl AsRef<Path>) -> Result<Vec<RegisteredPrinter>, Error> {
    let path = path.as_ref();
    let path_label = path.display().to_string();

    debug!(target: targets::STORAGE, path = %path_label, "Loading printer list");

    let contents = fs::read_to_string(path).map_err(|source| Error::StorageIo {
        action: StorageAction::Load,
        path: Some(path_label.clone()),
        source,
    })?;

    let printers: Vec<RegisteredPrinter> =
        from_str(&contents).map_err(|source| Error::Ron {
            action: StorageAction::Load,
            path: Some(path_label.clone()),
            source: source.into(),
        })?;

    info!(
        target: targets::STORAGE,
        path = %path_label,
        count = printers.len(),
        "Printer list loaded"
    );
    Ok(printers)
}

pub fn save_printers(
    path: impl AsRef<Path>,
    printers: &[RegisteredPrinter],
) -> Result<(), Error> {
    let path = path.as_ref();
    let path_label = path.display().to_string();

    let contents =
        to_string_pretty(&printers, PrettyConfig::new()).map_err(|source| Error::Ron {
            action: StorageAction::Save,
            path: Some(path_label.clone()),
            source,
        })?;

    fs::write(path, contents).map_err(|source| Error::StorageIo {
        action: StorageAction::Save,
        path: Some(path_label.clone()),
        source,
    })?;

    info!(
        target: targets::STORAGE,
        path = %path_label,
        count = printers.len(),
        "Printer list saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("printers.ron");

        let mut main = RegisteredPrinter::new("Bar", "192.168.1.40");
        main.is_main = true;
        let printers = vec![main, RegisteredPrinter::new("Kitchen", "192.168.1.41")];

        save_printers(&path, &printers).expect("save");
        let loaded = load_printers(&path).expect("load");
        assert_eq!(loaded, printers);
    }

    #[test]
    fn load_missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error =
            load_printers(dir.path().join("absent.ron")).expect_err("expected error");
        match error {
            Error::StorageIo { action, .. } => assert_eq!(action, StorageAction::Load),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_rejects_malformed_ron() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("printers.ron");
        fs::write(&path, "not ron at all").expect("write");

        let error = load_printers(&path).expect_err("expected error");
        assert!(matches!(
            error,
            Error::Ron {
                action: StorageAction::Load,
                ..
            }
        ));
    }
}
