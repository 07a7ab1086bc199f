use std::io::Cursor;
use std::sync::Arc;

use byggdok::compliance::{
    Building, BuildingId, ComplianceEngine, CompliancePolicy, DocumentStatus, DocumentType,
    RequiredDocumentTypes, TenantId,
};
use byggdok::documents::views::BuildingOverview;
use byggdok::documents::{
    BuildingDocumentService, DocumentFilter, DocumentServiceError, DocumentStore, NewDocument,
    StoreError,
};
use byggdok::error::AppError;
use chrono::{Datelike, Local};
use clap::Args;

use crate::infra::InMemoryDocumentStore;

pub(crate) const DEMO_TENANT: TenantId = TenantId(1);

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Limit the report to buildings whose name or address contains the text
    #[arg(long)]
    pub(crate) building: Option<String>,
    /// Reference year for staleness (defaults to the current year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
    /// Include the per-type document listing in the output
    #[arg(long)]
    pub(crate) list_documents: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference year for staleness (defaults to the current year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
    /// Include the per-type document listing in the output
    #[arg(long)]
    pub(crate) list_documents: bool,
}

/// The Stadsgården portfolio: three buildings and their document registers.
pub(crate) fn seed_demo_portfolio(store: &InMemoryDocumentStore) -> Result<(), StoreError> {
    let buildings = [
        (1, "Skola Björken", "Björkgatan 12, Göteborg"),
        (2, "Kontor Eken", "Ekallén 4, Göteborg"),
        (3, "Bostäder Lönnen", "Lönnvägen 9, Göteborg"),
    ];
    for (id, name, address) in buildings {
        store.insert_building(Building {
            id: BuildingId(id),
            name: name.to_string(),
            address: address.to_string(),
            tenant_id: DEMO_TENANT,
        });
    }

    let documents = [
        (1, "ritning-skolan-2016.pdf", "ritning", "ersatt", 2016),
        (1, "ritning-skolan-2018.pdf", "ritning", "ersatt", 2018),
        (1, "ritning-skolan-2021.pdf", "ritning", "gällande", 2021),
        (1, "ovk-skolan-2014.pdf", "OVK", "ersatt", 2014),
        (1, "ovk-skolan-2017.pdf", "OVK", "ersatt", 2017),
        (1, "ovk-skolan-2020.pdf", "OVK", "gällande", 2020),
        (1, "brandskydd-skolan-2019.pdf", "brandskydd", "osäker", 2019),
        (1, "brandskydd-skolan-2021.pdf", "brandskydd", "gällande", 2021),
        (1, "service-skolan-2019.pdf", "service", "ersatt", 2019),
        (1, "service-skolan-2022.pdf", "service", "gällande", 2022),
        (2, "ritning-kontor-2012.pdf", "ritning", "ersatt", 2012),
        (2, "ritning-kontor-2016.pdf", "ritning", "ersatt", 2016),
        (2, "ritning-kontor-2020.pdf", "ritning", "gällande", 2020),
        (2, "ovk-kontor-2015.pdf", "OVK", "gällande", 2015),
        (2, "ovk-kontor-2019.pdf", "OVK", "osäker", 2019),
        (2, "brandskydd-kontor-2018.pdf", "brandskydd", "gällande", 2018),
        (2, "brandskydd-kontor-2022.pdf", "brandskydd", "gällande", 2022),
        (2, "service-kontor-2019.pdf", "service", "ersatt", 2019),
        (2, "service-kontor-2021.pdf", "service", "osäker", 2021),
        (3, "ritning-bostad-2014.pdf", "ritning", "gällande", 2014),
        (3, "ritning-bostad-2019.pdf", "ritning", "osäker", 2019),
        (3, "brandskydd-bostad-2016.pdf", "brandskydd", "ersatt", 2016),
        (3, "brandskydd-bostad-2020.pdf", "brandskydd", "gällande", 2020),
        (3, "service-bostad-2018.pdf", "service", "ersatt", 2018),
        (3, "service-bostad-2023.pdf", "service", "gällande", 2023),
    ];
    for (building, filename, document_type, status, year) in documents {
        store.insert_document(NewDocument {
            building_id: BuildingId(building),
            filename: filename.to_string(),
            document_type: DocumentType::new(document_type),
            status: DocumentStatus::from_raw(status),
            year,
            file_url: format!("/docs/{filename}"),
        })?;
    }

    Ok(())
}

pub(crate) fn demo_service() -> Result<BuildingDocumentService<InMemoryDocumentStore>, AppError> {
    let store = Arc::new(InMemoryDocumentStore::default());
    seed_demo_portfolio(&store).map_err(DocumentServiceError::from)?;
    Ok(BuildingDocumentService::new(
        store,
        RequiredDocumentTypes::standard(),
        ComplianceEngine::new(CompliancePolicy::default()),
    ))
}

pub(crate) fn run_compliance_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        building,
        reference_year,
        list_documents,
    } = args;

    let service = demo_service()?;
    let reference_year = reference_year.unwrap_or_else(|| Local::now().year());
    let search = building.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let buildings = service.list_buildings(DEMO_TENANT, search)?;
    if buildings.is_empty() {
        println!("Inga byggnader matchade sökningen");
        return Ok(());
    }

    for building in buildings {
        let overview = service.building_overview(
            DEMO_TENANT,
            building.id,
            &DocumentFilter::default(),
            reference_year,
        )?;
        render_overview(&overview, list_documents);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        reference_year,
        list_documents,
    } = args;

    let service = demo_service()?;
    let reference_year = reference_year.unwrap_or_else(|| Local::now().year());

    println!("Byggdok demo – Stadsgården Fastigheter AB");
    for building in service.list_buildings(DEMO_TENANT, None)? {
        let overview = service.building_overview(
            DEMO_TENANT,
            building.id,
            &DocumentFilter::default(),
            reference_year,
        )?;
        render_overview(&overview, list_documents);
    }

    let register = "Filnamn,Dokumenttyp,Status,År,Länk\n\
ovk-bostad-2024.pdf,OVK,gällande,2024,/docs/ovk-bostad-2024.pdf\n";
    println!("\nImport av dokumentregister (OVK, Bostäder Lönnen)");
    let imported = service.import_register(DEMO_TENANT, BuildingId(3), Cursor::new(register))?;
    println!("- {} dokument importerade", imported.len());

    let overview = service.building_overview(
        DEMO_TENANT,
        BuildingId(3),
        &DocumentFilter::default(),
        reference_year,
    )?;
    render_overview(&overview, list_documents);

    Ok(())
}

fn render_overview(overview: &BuildingOverview, list_documents: bool) {
    println!(
        "\n{} ({})",
        overview.building.name, overview.building.address
    );

    if overview.gaps.is_empty() {
        println!("Dokumentation komplett (referensår {})", overview.reference_year);
    } else {
        println!("Brister (referensår {}):", overview.reference_year);
        for gap in &overview.gaps {
            println!("- [{}] {}", gap.severity_label, gap.message);
        }
    }

    if list_documents {
        for group in &overview.documents_by_type {
            println!("\n{}", group.document_type);
            if group.documents.is_empty() {
                println!("- inga dokument");
            }
            for document in &group.documents {
                println!(
                    "- {} ({}) {}",
                    document.filename, document.year, document.status_label
                );
            }
        }
    }
}
