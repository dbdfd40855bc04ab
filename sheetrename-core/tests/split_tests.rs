mod common;

use common::{create_mock_pdf, page_markers};
use sheetrename_core::split::page_count;
use sheetrename_core::{Error, SplitOptions, split_pdf};
use std::fs;

#[test]
fn test_split_preserves_page_order() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("scan.pdf");
    create_mock_pdf(&source, 7)?;

    let report = split_pdf(&source, &SplitOptions::new(3))?;
    assert_eq!(report.total_pages, 7);
    assert_eq!(report.parts.len(), 3);

    let split_dir = dir.path().join("split");
    assert_eq!(
        page_markers(&split_dir.join("scan_1.pdf"))?,
        vec!["% page 1", "% page 2", "% page 3"]
    );
    assert_eq!(
        page_markers(&split_dir.join("scan_2.pdf"))?,
        vec!["% page 4", "% page 5", "% page 6"]
    );
    assert_eq!(page_markers(&split_dir.join("scan_3.pdf"))?, vec!["% page 7"]);

    // The source is left untouched
    assert_eq!(page_count(&source)?, 7);
    Ok(())
}

#[test]
fn test_part_count_is_ceiling_of_pages() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for (pages, per_part) in [(1usize, 1usize), (4, 2), (5, 2), (3, 10)] {
        let source = dir.path().join(format!("doc{}x{}.pdf", pages, per_part));
        create_mock_pdf(&source, pages)?;
        let out = dir.path().join(format!("out{}x{}", pages, per_part));

        let report = split_pdf(&source, &SplitOptions::new(per_part).with_output_dir(&out))?;
        assert_eq!(report.parts.len(), pages.div_ceil(per_part));
        for part in &report.parts {
            let count = page_count(&part.path)?;
            assert!(count <= per_part);
            assert_eq!(count, part.page_count());
        }
    }
    Ok(())
}

#[test]
fn test_existing_part_stops_split() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("scan.pdf");
    create_mock_pdf(&source, 4)?;

    let split_dir = dir.path().join("split");
    fs::create_dir(&split_dir)?;
    fs::write(split_dir.join("scan_2.pdf"), b"keep me")?;

    let err = split_pdf(&source, &SplitOptions::new(2)).unwrap_err();
    assert!(matches!(err, Error::Collision(ref p) if p.ends_with("scan_2.pdf")));
    assert!(!split_dir.join("scan_1.pdf").exists());
    assert_eq!(fs::read(split_dir.join("scan_2.pdf"))?, b"keep me");
    Ok(())
}

#[test]
fn test_corrupt_pdf() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("broken.pdf");
    fs::write(&source, b"%PDF-1.5\nthis is not really a pdf")?;

    let err = split_pdf(&source, &SplitOptions::new(1)).unwrap_err();
    assert!(matches!(err, Error::Pdf { .. } | Error::Io { .. }));
    assert!(!dir.path().join("split").exists());
    Ok(())
}
