use speculate2::speculate;

speculate! {
    use chrono::NaiveDate;
    use crew_planner::config::ExportConfig;
    use crew_planner::export::{layout::CellStyle, MonthExporter};
    use planner_core::models::{CreateClientInput, Crew, PlanEntry};
    use planner_core::{Database, DatabaseConfig, YearMonth};

    before {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DatabaseConfig::new(dir.path().join("export.db"))).unwrap();
        db.migrate().unwrap();
        let acme = db
            .create_client(CreateClientInput { name: "Acme".into(), ..Default::default() })
            .unwrap()
            .id;
        let march = YearMonth::new(2024, 3).unwrap();
        let config = ExportConfig::default();
        let generated_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
    }

    describe "monthly export" {
        it "marks external-lab visits and adds the legend" {
            db.replace_month(march, &[PlanEntry::new(5, acme, Crew::R1).with_external_lab()])
                .unwrap();

            let layout = MonthExporter::new(&db, &config).layout(march, generated_at).unwrap();
            let (row, col) = layout.locate_day(5).unwrap();
            assert_eq!(layout.text_at(row + 1, col), Some("R01:\n- ★ Acme"));
            assert_eq!(layout.text_at(row + 2, col), Some("R02:\n"));

            let legend = layout.legend_row.expect("legend row");
            assert!(layout.text_at(legend, 0).unwrap().contains("External laboratory"));
        }

        it "leaves the legend out when nothing is flagged" {
            db.replace_month(march, &[PlanEntry::new(5, acme, Crew::R2)]).unwrap();

            let layout = MonthExporter::new(&db, &config).layout(march, generated_at).unwrap();
            assert!(layout.legend_row.is_none());
            let (row, col) = layout.locate_day(5).unwrap();
            assert_eq!(layout.text_at(row + 2, col), Some("R02:\n- Acme"));
        }

        it "only lays out weeks that hold days of the month" {
            // February 2015 spans exactly four weeks
            let february = YearMonth::new(2015, 2).unwrap();
            let layout = MonthExporter::new(&db, &config).layout(february, generated_at).unwrap();
            let fillers = layout.merges.iter().filter(|m| m.style == CellStyle::Filler).count();
            assert_eq!(fillers, 0);
            assert_eq!(layout.footer_row, 5 + 4 * 3);
        }

        it "writes a workbook with the month in its file name" {
            db.replace_month(march, &[PlanEntry::new(5, acme, Crew::R1).with_external_lab()])
                .unwrap();

            let exported = MonthExporter::new(&db, &config).export(march, generated_at).unwrap();
            assert_eq!(exported.file_name, "Plan_March_2024.xlsx");
            assert!(exported.has_external_lab);
            assert!(exported.bytes.starts_with(b"PK"));
        }

        it "drops a deleted client from the export" {
            db.replace_month(march, &[PlanEntry::new(5, acme, Crew::R1)]).unwrap();
            db.delete_client(acme).unwrap();

            let layout = MonthExporter::new(&db, &config).layout(march, generated_at).unwrap();
            let (row, col) = layout.locate_day(5).unwrap();
            assert_eq!(layout.text_at(row + 1, col), Some("R01:\n"));
        }
    }
}
