use transit_catalogue::catalogue::CatalogueBuilder;
use transit_catalogue::geo::Coordinate;
use transit_catalogue::render::{self, RenderSettings};
use transit_catalogue::router::{RoutingSettings, TransitRouter};
use transit_catalogue::stat;

fn sample_network() -> transit_catalogue::catalogue::Catalogue {
    let mut builder = CatalogueBuilder::new();
    builder.add_stop("Biryulyovo Zapadnoye", Coordinate::new(55.574_371, 37.651_700));
    builder.add_stop("Biryusinka", Coordinate::new(55.581_065, 37.648_390));
    builder.add_stop("Universam", Coordinate::new(55.587_655, 37.645_687));
    builder.add_stop("Lonely Siding", Coordinate::new(56.0, 38.0));
    builder.set_distance("Biryulyovo Zapadnoye", "Biryusinka", 1_800);
    builder.set_distance("Biryusinka", "Universam", 2_400);
    builder.set_distance("Universam", "Biryulyovo Zapadnoye", 2_500);
    builder
        .add_route(
            "297",
            &[
                "Biryulyovo Zapadnoye".into(),
                "Biryusinka".into(),
                "Universam".into(),
                "Biryulyovo Zapadnoye".into(),
            ],
            true,
        )
        .unwrap();
    builder.build()
}

fn settings() -> RenderSettings {
    RenderSettings::new(
        600.0,
        400.0,
        50.0,
        5.0,
        14.0,
        20,
        (7.0, 15.0),
        20,
        (7.0, -3.0),
        render::RenderColor::Named("white".into()),
        3.0,
        vec![render::RenderColor::Named("green".into())],
    )
    .unwrap()
}

#[test]
fn unregistered_stop_query_reports_not_found() {
    let catalogue = sample_network();
    let err = stat::buses_for_stop(&catalogue, "Nowhere").unwrap_err();
    assert_eq!(err.to_string(), "not found");
}

#[test]
fn isolated_stop_excluded_from_map_and_sorted_stops() {
    let catalogue = sample_network();
    let names: Vec<&str> = catalogue
        .sorted_stops()
        .into_iter()
        .map(|id| catalogue.stop(id).name.as_str())
        .collect();
    assert!(!names.contains(&"Lonely Siding"));

    let svg = render::render(&catalogue, &settings()).unwrap();
    assert!(!svg.contains("Lonely Siding"));
}

#[test]
fn stat_render_and_router_agree_on_the_same_catalogue() {
    let catalogue = sample_network();

    let stats = stat::route_stats_by_name(&catalogue, "297").unwrap();
    assert_eq!(stats.stops_count, 4);
    assert_eq!(stats.unique_stops_count, 3);
    assert_eq!(stats.route_length, 1_800.0 + 2_400.0 + 2_500.0);

    let buses = stat::buses_for_stop(&catalogue, "Biryusinka").unwrap();
    assert_eq!(buses, vec!["297"]);

    let router = TransitRouter::build(&catalogue, RoutingSettings::new(6, 40.0).unwrap());
    let route = router
        .find_route(&catalogue, "Biryulyovo Zapadnoye", "Universam")
        .unwrap();
    assert!(route.total_time > 6.0); // at least the initial wait

    let svg = render::render(&catalogue, &settings()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("Biryusinka"));
}
