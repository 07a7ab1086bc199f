use std::io::Cursor;

use super::common::SCHOOL;
use crate::compliance::DocumentStatus;
use crate::documents::{DocumentRegisterImporter, RegisterImportError};

#[test]
fn importer_parses_register_rows() {
    let csv = "Filnamn,Dokumenttyp,Status,År,Länk\n\
ovk-skolan-2023.pdf,OVK,gällande,2023,/docs/ovk-skolan-2023.pdf\n\
brandskydd-skolan-2018.pdf,brandskydd,ersatt,2018,\n";

    let rows = DocumentRegisterImporter::from_reader(Cursor::new(csv), SCHOOL)
        .expect("import succeeds");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].document_type.as_str(), "OVK");
    assert_eq!(rows[0].status, DocumentStatus::Current);
    assert_eq!(rows[0].year, 2023);
    assert_eq!(rows[0].file_url, "/docs/ovk-skolan-2023.pdf");

    // A blank link column falls back to the conventional location.
    assert_eq!(rows[1].file_url, "/docs/brandskydd-skolan-2018.pdf");
    assert_eq!(rows[1].status, DocumentStatus::Superseded);
}

#[test]
fn importer_preserves_unknown_status_values() {
    let csv = "Filnamn,Dokumenttyp,Status,År,Länk\n\
hiss-skolan-2022.pdf,hissbesiktning,arkiverad,2022,/docs/hiss-skolan-2022.pdf\n";

    let rows = DocumentRegisterImporter::from_reader(Cursor::new(csv), SCHOOL)
        .expect("import succeeds");
    assert_eq!(
        rows[0].status,
        DocumentStatus::Other("arkiverad".to_string())
    );
    assert_eq!(rows[0].document_type.as_str(), "hissbesiktning");
}

#[test]
fn importer_reports_the_line_of_an_empty_type_column() {
    let csv = "Filnamn,Dokumenttyp,Status,År,Länk\n\
ovk-skolan-2023.pdf,OVK,gällande,2023,\n\
ritning-skolan-2021.pdf,,gällande,2021,\n";

    let error = DocumentRegisterImporter::from_reader(Cursor::new(csv), SCHOOL)
        .expect_err("empty type rejected");
    match error {
        RegisterImportError::EmptyField { line, field } => {
            assert_eq!(line, 3);
            assert_eq!(field, "Dokumenttyp");
        }
        other => panic!("expected empty field error, got {other:?}"),
    }
}

#[test]
fn importer_rejects_non_numeric_years() {
    let csv = "Filnamn,Dokumenttyp,Status,År,Länk\nritning.pdf,ritning,gällande,tjugo,\n";

    let error = DocumentRegisterImporter::from_reader(Cursor::new(csv), SCHOOL)
        .expect_err("non-numeric year rejected");
    assert!(matches!(error, RegisterImportError::Csv(_)));
}

#[test]
fn importer_surfaces_io_errors_from_paths() {
    let error = DocumentRegisterImporter::from_path("./does-not-exist.csv", SCHOOL)
        .expect_err("expected io error");
    assert!(matches!(error, RegisterImportError::Io(_)));
}
