/*
 * Created on Wed Jun 17 2026
 *
 * This file is a part of Wirelog
 * Wirelog is a free and open-source logger that turns a stream of
 * schema-drifting wire records into rotating CSV files with bounded
 * on-disk retention.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

use {
    rand::{distributions::Alphanumeric, Rng},
    std::{
        fs,
        ops::Deref,
        path::{Path, PathBuf},
    },
};

pub fn random_string(rng: &mut impl Rng, l: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(l)
        .map(char::from)
        .collect()
}

/// A scratch directory under the OS temp dir that is removed on drop. The directory itself
/// is not created; the engine is expected to create it when it opens its first file
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new(name: &str) -> Self {
        let suffix = random_string(&mut rand::thread_rng(), 12);
        Self {
            path: std::env::temp_dir().join(format!("wirelogd-{name}-{suffix}")),
        }
    }
    /// Same as [`Self::new`], but also creates the directory
    pub fn create(name: &str) -> Self {
        let slf = Self::new(name);
        fs::create_dir_all(&slf.path).unwrap();
        slf
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Creates an empty file in this directory
    pub fn touch(&self, file_name: &str) {
        fs::create_dir_all(&self.path).unwrap();
        fs::File::create(self.path.join(file_name)).unwrap();
    }
    /// Returns the sorted list of file names in this directory
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.path) {
            Ok(rd) => rd
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => vec![],
        };
        names.sort();
        names
    }
    pub fn read_lines(&self, file_name: &str) -> Vec<String> {
        fs::read_to_string(self.path.join(file_name))
            .unwrap()
            .lines()
            .map(ToOwned::to_owned)
            .collect()
    }
}

impl Deref for TestDir {
    type Target = Path;
    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
