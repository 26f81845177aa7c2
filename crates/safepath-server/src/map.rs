//! Interactive HTML map rendering for computed routes.
//!
//! Produces a self-contained Leaflet page with the route polyline,
//! start/end markers, and hazard circles colored by danger level.

use safepath_core::{Coordinate, HazardZone};

const DEFAULT_ZOOM: u32 = 14;

/// Color for a hazard circle based on its danger level.
pub fn hazard_color(level: u8) -> &'static str {
    if level >= 5 {
        "darkred"
    } else if level >= 4 {
        "red"
    } else if level >= 3 {
        "orange"
    } else {
        "yellow"
    }
}

/// Render the route map as a standalone HTML document.
pub fn render_route_map(
    route: &[Coordinate],
    start: Coordinate,
    end: Coordinate,
    hazards: &[HazardZone],
) -> String {
    let mut overlays = String::new();

    if !route.is_empty() {
        let coords: Vec<String> = route
            .iter()
            .map(|point| format!("[{:.7},{:.7}]", point.lat, point.lon))
            .collect();
        overlays.push_str(&format!(
            "L.polyline([{}], {{color: 'blue', weight: 5, opacity: 0.8}})\
             .bindPopup('Safe Route ({} waypoints)').addTo(map);\n",
            coords.join(","),
            route.len()
        ));
    }

    overlays.push_str(&format!(
        "L.marker([{:.7},{:.7}]).bindPopup('START').addTo(map);\n",
        start.lat, start.lon
    ));
    overlays.push_str(&format!(
        "L.marker([{:.7},{:.7}]).bindPopup('END').addTo(map);\n",
        end.lat, end.lon
    ));

    for hazard in hazards {
        let color = hazard_color(hazard.level);
        let name = escape_js(&hazard.name);
        overlays.push_str(&format!(
            "L.circle([{:.7},{:.7}], {{radius: {}, color: '{color}', fillColor: '{color}', \
             fillOpacity: 0.4}}).bindPopup('<b>{name}</b><br>Level: {}<br>Radius: {}m').addTo(map);\n",
            hazard.lat, hazard.lon, hazard.radius_m, hazard.level, hazard.radius_m
        ));
        overlays.push_str(&format!(
            "L.circleMarker([{:.7},{:.7}], {{radius: 6, color: 'black', fill: true}})\
             .bindPopup('{name}').addTo(map);\n",
            hazard.lat, hazard.lon
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Safe Route</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView([{:.7},{:.7}], {DEFAULT_ZOOM});
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
    attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
{overlays}</script>
</body>
</html>
"#,
        start.lat, start.lon
    )
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
