#![cfg(feature = "iccma")]

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

#[test]
fn test_no_args_displays_authors() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("circabri_iccma17")?;
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("circabri "))
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_problems() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("circabri_iccma17")?;
    cmd.arg("--problems");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[D3,DC-CO,"))
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_formats() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("circabri_iccma17")?;
    cmd.arg("--formats");
    cmd.assert().success().stdout("[apx,tgf]\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_solve_tgf() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new()?;
    let solver = dir.child("solver.sh");
    solver.write_str("#!/bin/sh\ncat > /dev/null\necho 'v a c'\n")?;
    std::fs::set_permissions(solver.path(), std::fs::Permissions::from_mode(0o755))?;
    let file = dir.child("instance.tgf");
    file.write_str("a\nb\nc\n#\na b\nb c\n")?;
    let mut cmd = Command::cargo_bin("circabri_iccma17")?;
    cmd.arg("-p")
        .arg("SE-PR")
        .arg("-f")
        .arg(file.path())
        .arg("-fo")
        .arg("tgf")
        .arg("--circ")
        .arg(solver.path());
    cmd.assert()
        .success()
        .stdout("[a,c]\n")
        .stderr(predicate::str::is_empty());
    Ok(())
}
