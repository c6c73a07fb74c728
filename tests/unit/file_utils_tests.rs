/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use loctrans::file_utils::FileManager;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "exists.yml", "content")?;
    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test localization file discovery: .yml only, case-insensitive, recursive
#[test]
fn test_find_localization_files_shouldMatchYmlRecursively() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    common::create_test_file(&root, "a.yml", "x")?;
    common::create_test_file(&root, "b.YML", "x")?;
    common::create_test_file(&root, "ignore.txt", "x")?;
    let nested = root.join("nested");
    fs::create_dir(&nested)?;
    common::create_test_file(&nested, "c.yml", "x")?;

    let files = FileManager::find_localization_files(&root)?;
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|p| {
        p.extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case("yml"))
            .unwrap_or(false)
    }));
    Ok(())
}

/// Test that backup files keep the .backup suffix and original content
#[test]
fn test_backup_once_withFreshFile_shouldCreateBackup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "l.yml", "original")?;

    assert!(FileManager::backup_once(&file)?);

    let backup = FileManager::backup_path(&file);
    assert!(backup.exists());
    assert_eq!(fs::read_to_string(&backup)?, "original");
    Ok(())
}

/// Test first-write-wins: a second backup never overwrites the first
#[test]
fn test_backup_once_withExistingBackup_shouldNotOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "l.yml", "original")?;

    assert!(FileManager::backup_once(&file)?);

    // the working copy changes, as it would after translation
    fs::write(&file, "translated")?;
    assert!(!FileManager::backup_once(&file)?);

    let backup = FileManager::backup_path(&file);
    assert_eq!(fs::read_to_string(&backup)?, "original");
    Ok(())
}

/// Test lossy reading of files with invalid UTF-8 bytes
#[test]
fn test_read_to_string_lossy_withInvalidUtf8_shouldNotFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("dirty.yml");
    fs::write(&path, [b'o', b'k', 0xFF, b'!'])?;

    let content = FileManager::read_to_string_lossy(&path)?;
    assert!(content.starts_with("ok"));
    assert!(content.ends_with('!'));
    Ok(())
}
