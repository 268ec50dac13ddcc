use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("charity-fund"));
    cmd.arg("tests/fixtures/commands.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,name,description,full_amount,invested_amount,fully_invested,create_date,close_date",
        ))
        // Cats was filled by both donations
        .stdout(predicate::str::contains("1,Cats,Food for cats,100,100,true,"))
        // Dogs absorbed the 10 left on the second donation
        .stdout(predicate::str::contains("2,Dogs,Toys for dogs,30,10,false,"));

    Ok(())
}

#[test]
fn test_cli_donations_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("charity-fund"));
    cmd.arg("tests/fixtures/commands.csv")
        .arg("--output")
        .arg("donations");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,user_id,comment,full_amount,invested_amount,fully_invested,create_date,close_date",
        ))
        .stdout(predicate::str::contains("1,7,first,60,60,true,"))
        .stdout(predicate::str::contains("2,8,,50,50,true,"));

    Ok(())
}

#[test]
fn test_cli_completion_report() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("charity-fund"));
    cmd.arg("tests/fixtures/commands.csv")
        .arg("--output")
        .arg("completion");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("name,collection_time,description"))
        .stdout(predicate::str::contains("Cats,0:00:"))
        .stdout(predicate::str::contains("Dogs").not());

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("charity-fund"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
