mod dto;
mod error;

use std::io::{self, Read, Write};
use std::process;

use transit_catalogue::catalogue::{Catalogue, CatalogueBuilder};
use transit_catalogue::geo::Coordinate;
use transit_catalogue::render::{self, RenderSettings};
use transit_catalogue::router::{RoutingSettings, TransitRouter};
use transit_catalogue::stat;

use dto::{BaseRequestDto, Envelope, RouteItemDto, StatRequestKind, StatResponseDto};
use error::Error;

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let envelope: Envelope = serde_json::from_str(&input)?;

    let catalogue = ingest(&envelope.base_requests)?;

    let render_settings = envelope
        .render_settings
        .map(dto::RenderSettingsDto::into_settings)
        .transpose()?;
    let routing_settings = envelope
        .routing_settings
        .map(dto::RoutingSettingsDto::into_settings)
        .transpose()?;
    let router = routing_settings.map(|settings| TransitRouter::build(&catalogue, settings));

    let responses: Vec<StatResponseDto> = envelope
        .stat_requests
        .into_iter()
        .map(|request| answer(&catalogue, render_settings.as_ref(), router.as_ref(), request))
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, &responses)?;
    handle.write_all(b"\n")?;
    Ok(())
}

/// Builds the [`Catalogue`] in the fixed phase order required by §5: all
/// stops, then all road distances, then all buses — independent of the
/// order `base_requests` entries appear in.
fn ingest(requests: &[BaseRequestDto]) -> Result<Catalogue, Error> {
    let mut builder = CatalogueBuilder::new();

    for request in requests {
        if let BaseRequestDto::Stop { name, latitude, longitude, .. } = request {
            builder.add_stop(name, Coordinate::new(*latitude, *longitude));
        }
    }
    for request in requests {
        if let BaseRequestDto::Stop { name, road_distances, .. } = request {
            for (to, metres) in road_distances {
                builder.set_distance(name, to, *metres);
            }
        }
    }
    for request in requests {
        if let BaseRequestDto::Bus { name, stops, is_roundtrip } = request {
            builder.add_route(name, stops, *is_roundtrip)?;
        }
    }

    Ok(builder.build())
}

fn answer(
    catalogue: &Catalogue,
    render_settings: Option<&RenderSettings>,
    router: Option<&TransitRouter>,
    request: dto::StatRequest,
) -> StatResponseDto {
    let request_id = request.id;
    match request.kind {
        StatRequestKind::Stop { name } => match stat::buses_for_stop(catalogue, &name) {
            Ok(buses) => StatResponseDto::Stop { request_id, buses },
            Err(err) => error_response(request_id, err),
        },
        StatRequestKind::Bus { name } => match stat::route_stats_by_name(catalogue, &name) {
            Ok(stats) => StatResponseDto::Bus {
                request_id,
                curvature: stats.curvature,
                route_length: stats.route_length,
                stop_count: stats.stops_count,
                unique_stop_count: stats.unique_stops_count,
            },
            Err(err) => error_response(request_id, err),
        },
        StatRequestKind::Map => match render_settings {
            Some(settings) => match render::render(catalogue, settings) {
                Ok(map) => StatResponseDto::Map { request_id, map },
                Err(err) => StatResponseDto::Error {
                    request_id,
                    error_message: err.to_string(),
                },
            },
            None => StatResponseDto::Error {
                request_id,
                error_message: "not found".into(),
            },
        },
        StatRequestKind::Route { from, to } => match router {
            Some(router) => match router.find_route(catalogue, &from, &to) {
                Ok(answer) => StatResponseDto::Route {
                    request_id,
                    total_time: answer.total_time,
                    items: answer.items.into_iter().map(RouteItemDto::from).collect(),
                },
                Err(_) => StatResponseDto::Error {
                    request_id,
                    error_message: "not found".into(),
                },
            },
            None => StatResponseDto::Error {
                request_id,
                error_message: "not found".into(),
            },
        },
    }
}

fn error_response(request_id: u64, err: stat::Error) -> StatResponseDto {
    StatResponseDto::Error {
        request_id,
        error_message: err.to_string(),
    }
}
