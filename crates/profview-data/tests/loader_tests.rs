// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use profview_app::{
    FieldSchema, Line, PlaceholderReason, ProfileError, Resolution, ResourceResolver,
    ResourceStatus, Session,
};
use profview_data::{FsResourceResolver, load_record_set, read_record_set};
use profview_testkit::TempDataset;
use std::sync::Arc;

#[test]
fn faculty_csv_loads_rows_in_order() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let records = load_record_set(dataset.csv_path())?;

    assert_eq!(records.len(), 3);
    assert_eq!(records.display_names(), vec!["Dr. A", "Dr. B", "Dr. C"]);
    Ok(())
}

#[test]
fn quoted_multiline_cells_survive_parsing() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let records = load_record_set(dataset.csv_path())?;
    let first = records.get(0).expect("first record");

    assert_eq!(first.get("courses_taught"), Some("CS101\n\nCS202"));
    assert_eq!(first.get("education"), Some("PhD, MIT\nBSc, NUS"));
    Ok(())
}

#[test]
fn empty_cells_and_nan_read_as_absent() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let records = load_record_set(dataset.csv_path())?;

    let second = records.get(1).expect("second record");
    assert_eq!(second.get("phone_number"), None);
    assert_eq!(second.get("photo"), None);

    let third = records.get(2).expect("third record");
    assert_eq!(third.get("profile_website_link"), None);
    Ok(())
}

#[test]
fn missing_columns_read_as_absent() -> Result<()> {
    let records = read_record_set("name,office_location\nDr. A,Rm 1\nDr. B\n".as_bytes())?;
    let second = records.get(1).expect("short row");
    assert_eq!(second.get("name"), Some("Dr. B"));
    assert_eq!(second.get("office_location"), None);
    assert_eq!(second.get("courses_taught"), None);
    Ok(())
}

#[test]
fn missing_file_is_data_unavailable() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let error = load_record_set(&temp.path().join("nope.csv")).expect_err("missing file");
    assert!(matches!(error, ProfileError::DataUnavailable { .. }));
    assert!(error.to_string().contains("not found"));
    Ok(())
}

#[test]
fn header_only_file_is_data_unavailable() -> Result<()> {
    let dataset = TempDataset::with_csv("name,title\n")?;
    let error = load_record_set(dataset.csv_path()).expect_err("no rows");
    assert!(matches!(error, ProfileError::DataUnavailable { .. }));
    assert!(error.to_string().contains("no profiles"));
    Ok(())
}

#[test]
fn empty_file_is_data_unavailable() -> Result<()> {
    let dataset = TempDataset::with_csv("")?;
    let error = load_record_set(dataset.csv_path()).expect_err("empty file");
    assert!(matches!(error, ProfileError::DataUnavailable { .. }));
    Ok(())
}

#[test]
fn fs_resolver_distinguishes_found_missing_and_oversized() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let resolver = FsResourceResolver::beside(dataset.csv_path());

    match resolver.resolve("photos/a.png") {
        Resolution::Found(bytes) => assert!(bytes.starts_with(b"\x89PNG")),
        other => panic!("expected found, got {other:?}"),
    }
    assert_eq!(resolver.resolve("photos/missing.png"), Resolution::NotFound);
    assert_eq!(resolver.resolve("photos"), Resolution::NotFound);

    let tiny = resolver.clone().with_max_bytes(2);
    assert!(matches!(
        tiny.resolve("photos/a.png"),
        Resolution::LoadError(_)
    ));
    Ok(())
}

#[test]
fn fs_resolver_accepts_absolute_paths() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let absolute = dataset.add_file("elsewhere/b.jpg", b"jpeg")?;
    let resolver = FsResourceResolver::new("/definitely/not/here");

    assert_eq!(
        resolver.resolve(&absolute.to_string_lossy()),
        Resolution::Found(b"jpeg".to_vec())
    );
    Ok(())
}

#[test]
fn session_over_loaded_csv_renders_photo_outcomes() -> Result<()> {
    let dataset = TempDataset::faculty()?;
    let records = load_record_set(dataset.csv_path())?;
    let mut session = Session::new(
        Arc::new(records),
        Arc::new(FieldSchema::faculty()),
        FsResourceResolver::beside(dataset.csv_path()),
    );

    let photo_status = |view: &profview_app::ProfileView| {
        view.section("Photo")
            .and_then(|section| section.lines.first())
            .and_then(|line| match line {
                Line::Resource { status, .. } => Some(*status),
                _ => None,
            })
    };

    let first = session.render_current();
    assert!(matches!(
        photo_status(&first),
        Some(ResourceStatus::Loaded { .. })
    ));

    session.next();
    assert!(session.render_current().section("Photo").is_none());

    session.next();
    let third = session.render_current();
    assert_eq!(
        photo_status(&third),
        Some(ResourceStatus::Placeholder {
            reason: PlaceholderReason::NotFound,
        })
    );
    let courses = third.section("Courses Taught").expect("courses");
    assert_eq!(courses.lines.len(), 1);
    Ok(())
}
