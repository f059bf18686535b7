use std::{fs, io};
use std::path::PathBuf;

pub const POST_EXTENSIONS: [&str; 4] = ["txt", "md", "markdown", "html"];

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: PathBuf) -> Self {
        PostList { root_dir }
    }

    /// Post files directly under the root dir, sorted by file name
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            if let Ok(entry) = entry {
                if let Ok(file_type) = entry.file_type() {
                    if !file_type.is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if Self::is_post_file(&path) {
                        posts.push(path);
                    }
                }
            }
        }

        posts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(posts)
    }

    fn is_post_file(path: &PathBuf) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => POST_EXTENSIONS.contains(&ext),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_files() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b.md", "a.txt", "c.markdown", "d.html", "e.htm", "notes.docx", "README"] {
            fs::write(dir.path().join(name), "content")?;
        }
        fs::create_dir(dir.path().join("nested.md"))?;

        let post_list = PostList::new(dir.path().to_path_buf());
        let files = post_list.retrieve_files()?;
        let names: Vec<&str> = files.iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.txt", "b.md", "c.markdown", "d.html"]);
        Ok(())
    }

    #[test]
    fn test_missing_dir() {
        let post_list = PostList::new(PathBuf::from("/definitely/not/here"));
        let err = post_list.retrieve_files().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
