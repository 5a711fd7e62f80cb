use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::{debug, info, warn, error};
use tempfile::NamedTempFile;
use crate::errors::WikiError;
use crate::types::Page;

/// File-backed page storage, one `{title}.txt` per page
#[derive(Clone)]
pub struct PageStore {
    data_dir: Arc<PathBuf>,
}

impl PageStore {
    /// Create a new page store rooted at `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir: Arc::new(data_dir) }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// On-disk location of a page
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt", title))
    }

    /// Read a page. Missing and unreadable files are both errors.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        let body = fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                debug!("No page stored for '{}' at {:?}", title, path);
            } else {
                warn!("Failed to read page '{}' from {:?}: {}", title, path, e);
            }
            WikiError::Io(e)
        })?;

        debug!("Loaded page '{}', {} bytes", title, body.len());
        Ok(Page { title: title.to_string(), body })
    }

    /// Write a page, replacing any previous content.
    ///
    /// The body goes to an owner-only temp file in the data directory which is
    /// then renamed over the target, so readers never see a partial write.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        self.write_atomic(&path, &page.body).map_err(|e| {
            error!("Failed to save page '{}' to {:?}: {}", page.title, path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }

    fn write_atomic(&self, path: &Path, body: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(self.data_dir.as_ref())?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());

        store.save(&Page::new("Test", "hello")).unwrap();
        let page = store.load("Test").unwrap();
        assert_eq!(page, Page::new("Test", "hello"));
        assert_eq!(fs::read(dir.path().join("Test.txt")).unwrap(), b"hello");
        assert_eq!(store.page_path("Test").parent(), Some(store.data_dir()));
    }

    #[test]
    fn save_overwrites_previous_body() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());

        store.save(&Page::new("Notes", "first draft, much longer than the second")).unwrap();
        store.save(&Page::new("Notes", "second")).unwrap();
        assert_eq!(store.load("Notes").unwrap().body, b"second");
        // no temp files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn binary_body_is_kept_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        let body = vec![0u8, 159, 146, 150, 255, b'\n'];

        store.save(&Page::new("Blob", body.clone())).unwrap();
        assert_eq!(store.load("Blob").unwrap().body, body);
    }

    #[test]
    fn load_missing_page_fails() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        assert!(matches!(store.load("Nope"), Err(WikiError::Io(_))));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().join("absent"));
        assert!(matches!(store.save(&Page::new("Test", "x")), Err(WikiError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        store.save(&Page::new("Secret", "s")).unwrap();
        let mode = fs::metadata(store.page_path("Secret")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
