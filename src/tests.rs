#[cfg(test)]
mod tests {
    use crate::aggregator_core::{
        ClimateCoordinator, ExportFormat, ExportedData, Observation, ObservationField, Rank, Scenario,
    };
    use crate::format::format_number;

    const DATASET: &str = "\
Year,Country,ISO.alpha-3,Total.CO2,Coal.CO2,Oil.CO2,Gas.CO2,Cement.CO2,Flaring.CO2,Other.CO2,Per.Capita.CO2,Total.Energy.Production,Coal.Energy,Gas.Energy,Petroleum.and.other.liquids.Energy,Nuclear.Energy,Renewables.and.other.Energy,CH4,Population,Temp_Change
2016,Atlantis,ATL,200,100,50,30,10,5,5,10,500,200,100,100,50,50,12,20000000,0.8
2016,Lemuria,LEM,100,20,40,30,5,3,2,4,300,30,90,100,30,50,8,25000000,0.4
2017,Atlantis,ATL,220,110,55,33,11,6,5,11,520,210,105,105,50,50,12,20000000,0.9
2017,Lemuria,LEM,110,22,44,33,6,3,2,4.4,310,31,92,102,30,55,8,25000000,-0.1
2018,Atlantis,ATL,242,120,60,40,12,5,5,12,540,220,110,110,50,50,13,20100000,1.0
2018,Lemuria,LEM,121,24,48,36,7,4,2,4.8,320,32,94,104,30,60,8,25200000,0.6
2018,Mu,,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,100000,0.2
";

    fn create_test_coordinator() -> ClimateCoordinator {
        let mut coordinator = ClimateCoordinator::new();
        coordinator.ingest_reader(DATASET.as_bytes()).unwrap();
        coordinator
    }

    /// Zero-emission row is rejected, everything else flows through
    #[test]
    fn test_full_ingestion_flow() {
        let coordinator = create_test_coordinator();
        let summary = coordinator.data_summary();

        assert_eq!(summary.total_records, 6);
        assert_eq!(summary.countries, 2);
        assert_eq!(summary.years, 3);

        let stats = summary.global_stats.unwrap();
        assert_eq!(stats.latest_year, 2018);
        assert_eq!(stats.total_countries, 2);
        assert_eq!(stats.total_emissions, 363.0);
        assert!((stats.average_per_capita - 8.4).abs() < 1e-9);
        assert!((stats.average_temp_change - 0.8).abs() < 1e-9);
        assert_eq!(format_number(stats.total_population, 2), "45.30M");

        let mix_total: f64 = stats.energy_mix.iter().map(|s| s.percentage).sum();
        assert!((mix_total - 100.0).abs() < 1e-9);
        let source_total: f64 = stats.emissions_by_source.iter().map(|s| s.value).sum();
        assert_eq!(source_total, 363.0);
    }

    #[test]
    fn test_trends_and_projection_agree() {
        let coordinator = create_test_coordinator();
        let trends = coordinator.global_trends();

        assert_eq!(trends.keys().copied().collect::<Vec<_>>(), vec![2016, 2017, 2018]);
        assert_eq!(trends[&2016].total_emissions, 300.0);
        assert_eq!(trends[&2017].average_temp_change, 0.9);

        let current = coordinator.generate_projection(Scenario::Current);
        let optimistic = coordinator.generate_projection(Scenario::Optimistic);
        let pessimistic = coordinator.generate_projection(Scenario::Pessimistic);

        assert_eq!(current[0].predicted, 363.0);
        assert!(optimistic[10].predicted < current[10].predicted);
        assert!(pessimistic[10].predicted > current[10].predicted);
        assert_eq!(current.last().unwrap().year, 2029);
    }

    #[test]
    fn test_country_views() {
        let coordinator = create_test_coordinator();

        let stats = coordinator.country_stats("Lemuria").unwrap();
        assert_eq!(stats.data_points, 3);
        assert_eq!(stats.latest.iso.as_deref(), Some("LEM"));
        assert!((stats.trends.temp_change - 0.2).abs() < 1e-9);
        assert_eq!(stats.rankings.total_emissions, Rank::Position(2));
        assert_eq!(stats.rankings.per_capita_emissions, Rank::Position(2));

        let unknown = coordinator.country_rankings("Mu");
        assert_eq!(unknown.total_emissions, Rank::NotApplicable);
        assert!(coordinator.country_stats("Mu").is_none());

        let by_pop = coordinator.compare_countries(&["Atlantis", "Lemuria"], ObservationField::Population);
        assert_eq!(by_pop[0].country, "Lemuria");
        assert_eq!(by_pop[0].data.year, 2018);
    }

    #[test]
    fn test_export_round_trip() {
        let coordinator = create_test_coordinator();

        let ExportedData::Json(json) = coordinator.export_data(ExportFormat::Json).unwrap() else {
            panic!("expected JSON export");
        };
        let parsed: Vec<Observation> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_slice(), coordinator.observations());

        let csv = coordinator.export_data(ExportFormat::Csv).unwrap();
        assert_eq!(csv.as_text().unwrap().lines().count(), 7);

        let raw = coordinator.export_data(ExportFormat::Raw).unwrap();
        assert_eq!(raw, ExportedData::Raw(coordinator.observations().to_vec()));
    }

    #[test]
    fn test_json_export_round_trips_full_precision_cells() {
        let mut coordinator = ClimateCoordinator::new();
        coordinator
            .ingest_reader(
                "Year,Country,Total.CO2,Per.Capita.CO2,Population\n\
                 2020,Atlantis,9122217.316509271,1.2345678901234567e-300,67886011.123456789\n"
                    .as_bytes(),
            )
            .unwrap();
        assert_eq!(coordinator.observations()[0].total_co2, 9122217.316509271);

        let ExportedData::Json(json) = coordinator.export_data(ExportFormat::Json).unwrap() else {
            panic!("expected JSON export");
        };
        let parsed: Vec<Observation> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_slice(), coordinator.observations());
    }
}
