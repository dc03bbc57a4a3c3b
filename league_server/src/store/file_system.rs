//! Player store backed by a JSON snapshot on the filesystem.
//!
//! The whole league is kept in memory and the file is rewritten in full after
//! every win, so the file always holds one complete JSON array.

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, error, info, instrument};

use super::league::{League, Player};
use super::tape::Tape;
use super::{PlayerStore, StoreError};

struct Database {
    league: League,
    tape: Tape<File>,
}

impl Database {
    /// Rewrite the snapshot with the full current league.
    fn persist(&mut self, sync: bool) -> io::Result<()> {
        let encoded = serde_json::to_vec(&self.league)?;
        self.tape.write_all(&encoded)?;
        self.tape.flush()?;
        if sync {
            self.tape.sync()?;
        }
        Ok(())
    }
}

/// League held in memory, persisted to a JSON file on every change.
pub struct FileSystemPlayerStore {
    database: Mutex<Database>,
    sync_on_write: bool,
}

impl FileSystemPlayerStore {
    /// Load the league from an open, read/write file handle.
    ///
    /// An empty file is initialised with `[]` first.
    pub fn new(mut file: File) -> Result<Self, StoreError> {
        init_player_db_file(&mut file)?;
        let league = League::from_reader(BufReader::new(&file))?;
        info!("Loaded {} players from player db file", league.len());

        Ok(Self {
            database: Mutex::new(Database {
                league,
                tape: Tape::new(file),
            }),
            sync_on_write: true,
        })
    }

    /// Open (creating if missing) the snapshot at `path` and load it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let open_err = |source: io::Error| StoreError::Open {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_err)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(open_err)?;

        Self::new(file)
    }

    /// Whether every rewrite is followed by `sync_data`. On by default.
    pub fn with_sync(mut self, sync_on_write: bool) -> Self {
        self.sync_on_write = sync_on_write;
        self
    }
}

fn init_player_db_file(file: &mut File) -> Result<(), StoreError> {
    file.seek(SeekFrom::Start(0)).map_err(StoreError::Inspect)?;

    let metadata = file.metadata().map_err(StoreError::Inspect)?;

    if metadata.len() == 0 {
        debug!("Player db file is empty, initialising with an empty league");
        file.write_all(b"[]").map_err(StoreError::Initialise)?;
        file.seek(SeekFrom::Start(0)).map_err(StoreError::Initialise)?;
    }

    Ok(())
}

impl PlayerStore for FileSystemPlayerStore {
    fn get_player_score(&self, name: &str) -> u64 {
        let database = self.database.lock();
        database.league.get(name).map(|p| p.wins).unwrap_or(0)
    }

    #[instrument(skip(self))]
    fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut database = self.database.lock();

        match database.league.find(name) {
            Some(player) => {
                player.wins = player
                    .wins
                    .checked_add(1)
                    .ok_or_else(|| StoreError::Overflow(name.to_string()))?;
            }
            None => database.league.push(Player::new(name, 1)),
        }

        if let Err(e) = database.persist(self.sync_on_write) {
            error!("Failed to persist league after win for {}: {}", name, e);
            return Err(StoreError::Write(e));
        }

        debug!("Persisted league with {} players", database.league.len());
        Ok(())
    }

    fn get_league(&self) -> League {
        let mut database = self.database.lock();
        database.league.sort_by_wins();
        database.league.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::NamedTempFile;

    /// Scratch snapshot file holding `initial`; removed when dropped.
    fn create_temp_file(initial: &str) -> (NamedTempFile, File) {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(initial.as_bytes()).unwrap();
        let file = tmp.reopen().unwrap();
        (tmp, file)
    }

    fn file_content(tmp: &NamedTempFile) -> String {
        let mut content = String::new();
        File::open(tmp.path())
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    const RYAN_AND_CHRIS: &str = r#"[
        {"Name": "Ryan", "Wins": 10},
        {"Name": "Chris", "Wins": 33}
    ]"#;

    #[test]
    fn test_league_from_a_reader() {
        let (_tmp, file) = create_temp_file(RYAN_AND_CHRIS);
        let store = FileSystemPlayerStore::new(file).unwrap();

        let want = League::from(vec![Player::new("Chris", 33), Player::new("Ryan", 10)]);
        assert_eq!(store.get_league(), want);

        // read again
        assert_eq!(store.get_league(), want);
    }

    #[test]
    fn test_get_player_score() {
        let (_tmp, file) = create_temp_file(
            r#"[{"Name": "Ryan", "Wins": 10}, {"Name": "Chris", "Wins": 22}]"#,
        );
        let store = FileSystemPlayerStore::new(file).unwrap();

        assert_eq!(store.get_player_score("Ryan"), 10);
        assert_eq!(store.get_player_score("Apollo"), 0);
    }

    #[test]
    fn test_store_wins_for_existing_player() {
        let (_tmp, file) = create_temp_file(RYAN_AND_CHRIS);
        let store = FileSystemPlayerStore::new(file).unwrap().with_sync(false);

        store.record_win("Ryan").unwrap();

        assert_eq!(store.get_player_score("Ryan"), 11);
    }

    #[test]
    fn test_store_wins_for_new_player() {
        let (_tmp, file) = create_temp_file(RYAN_AND_CHRIS);
        let store = FileSystemPlayerStore::new(file).unwrap().with_sync(false);

        store.record_win("Pepper").unwrap();

        assert_eq!(store.get_player_score("Pepper"), 1);
        assert_eq!(store.get_league().len(), 3);
    }

    #[test]
    fn test_works_with_an_empty_file() {
        let (tmp, file) = create_temp_file("");
        let store = FileSystemPlayerStore::new(file).unwrap();

        assert!(store.get_league().is_empty());
        assert_eq!(file_content(&tmp), "[]");
    }

    #[test]
    fn test_league_sorted() {
        let (_tmp, file) = create_temp_file(
            r#"[{"Name": "Ryan", "Wins": 10}, {"Name": "Chris", "Wins": 22}]"#,
        );
        let store = FileSystemPlayerStore::new(file).unwrap();

        let want = League::from(vec![Player::new("Chris", 22), Player::new("Ryan", 10)]);
        assert_eq!(store.get_league(), want);
        assert_eq!(store.get_league(), want);
    }

    #[test]
    fn test_malformed_snapshot_fails_construction() {
        let (_tmp, file) = create_temp_file("not json");
        let err = FileSystemPlayerStore::new(file).err().unwrap();

        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_win_rewrites_whole_snapshot() {
        let (tmp, file) = create_temp_file(RYAN_AND_CHRIS);
        let store = FileSystemPlayerStore::new(file).unwrap().with_sync(false);

        store.record_win("Chris").unwrap();
        store.record_win("Pepper").unwrap();

        let on_disk = League::from_reader(file_content(&tmp).as_bytes()).unwrap();
        assert_eq!(on_disk.len(), 3);
        assert_eq!(on_disk.get("Chris").unwrap().wins, 34);
        assert_eq!(on_disk.get("Pepper").unwrap().wins, 1);
        assert_eq!(on_disk.get("Ryan").unwrap().wins, 10);
    }

    #[test]
    fn test_read_only_handle_surfaces_write_error() {
        let (tmp, _) = create_temp_file(RYAN_AND_CHRIS);
        let file = File::open(tmp.path()).unwrap();
        let store = FileSystemPlayerStore::new(file).unwrap();

        let err = store.record_win("Ryan").unwrap_err();

        assert!(matches!(err, StoreError::Write(_)));
        // in-memory state keeps the increment
        assert_eq!(store.get_player_score("Ryan"), 11);
    }

    #[test]
    fn test_win_at_max_wins_is_rejected() {
        let (tmp, file) = create_temp_file(r#"[{"Name":"Ryan","Wins":18446744073709551615}]"#);
        let store = FileSystemPlayerStore::new(file).unwrap().with_sync(false);

        let err = store.record_win("Ryan").unwrap_err();

        assert!(matches!(err, StoreError::Overflow(ref name) if name == "Ryan"));
        assert_eq!(store.get_player_score("Ryan"), u64::MAX);
        let on_disk = League::from_reader(file_content(&tmp).as_bytes()).unwrap();
        assert_eq!(on_disk.get("Ryan").unwrap().wins, u64::MAX);
    }

    #[test]
    fn test_read_only_empty_file_fails_initialisation() {
        let (tmp, _) = create_temp_file("");
        let file = File::open(tmp.path()).unwrap();

        let err = FileSystemPlayerStore::new(file).err().unwrap();

        assert!(matches!(err, StoreError::Initialise(_)));
    }
}
