use std::io::Cursor;
use std::net::SocketAddr;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use image::{DynamicImage, ImageOutputFormat};
use log::{error, info};
use serde::{Deserialize, Serialize};

use orbitals::density::{radial_axis, slice_at};
use orbitals::render::{render_slice, Colormap};
use orbitals::{
    estimate_max_density, generate_electron_cloud, radial_probability_density, QuantumNumbers,
    SamplerConfig, SliceConfig,
};

#[derive(Deserialize)]
struct SampleQuery {
    n: Option<i32>,
    l: Option<i32>,
    m: Option<i32>,
    count: Option<usize>,
    attempts: Option<usize>,
    seed: Option<u64>,
}

#[derive(Serialize)]
struct SampleResponse {
    n: i32,
    l: i32,
    m: i32,
    count: usize,
    accepted: usize,
    attempts: usize,
    efficiency: f64,
    half_width: f64,
    samples: Vec<[f64; 3]>,
}

#[derive(Deserialize)]
struct RadialQuery {
    n: Option<i32>,
    l: Option<i32>,
    r_max: Option<f64>,
    points: Option<usize>,
}

#[derive(Serialize)]
struct RadialResponse {
    n: i32,
    l: i32,
    r: Vec<f64>,
    density: Vec<f64>,
}

#[derive(Deserialize)]
struct SliceQuery {
    n: Option<i32>,
    l: Option<i32>,
    m: Option<i32>,
    z: Option<f64>,
    grid_limit: Option<f64>,
    resolution: Option<usize>,
    cmap: Option<String>,
}

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Hydrogen Orbitals</title>
    <style>
      html, body { margin: 0; padding: 0; background: #0b0c10; color: #e6e6e6; font-family: "Segoe UI", sans-serif; }
      .page { max-width: 860px; margin: 0 auto; padding: 24px; }
      code { background: #10151c; padding: 2px 6px; border-radius: 4px; }
      img { margin-top: 16px; border: 1px solid #2a2f36; width: 500px; image-rendering: pixelated; }
      label { margin-right: 12px; }
      input { width: 64px; background: #11151b; color: #e6e6e6; border: 1px solid #2a2f36; }
    </style>
  </head>
  <body>
    <div class="page">
      <h1>Hydrogen Orbitals</h1>
      <p>
        <code>/samples?n=3&amp;l=2&amp;m=0&amp;count=5000</code> Monte Carlo point cloud (JSON)<br />
        <code>/radial?n=2&amp;l=1</code> radial probability density (JSON)<br />
        <code>/slice.png?n=3&amp;l=2&amp;m=0&amp;z=0</code> cross-section of |&psi;|&sup2; (PNG)
      </p>
      <div>
        <label>n <input id="n" type="number" value="3" min="1" /></label>
        <label>l <input id="l" type="number" value="2" min="0" /></label>
        <label>m <input id="m" type="number" value="0" /></label>
        <label>z <input id="z" type="range" min="-18" max="18" step="0.5" value="0" /></label>
      </div>
      <img id="slice" alt="slice" />
    </div>
    <script>
      const ids = ["n", "l", "m", "z"];
      function refresh() {
        const q = ids.map((id) => `${id}=${document.getElementById(id).value}`).join("&");
        document.getElementById("slice").src = `/slice.png?${q}&resolution=200`;
      }
      ids.forEach((id) => document.getElementById(id).addEventListener("input", refresh));
      refresh();
    </script>
  </body>
</html>
"##;

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn samples(Query(q): Query<SampleQuery>) -> Response {
    let n = q.n.unwrap_or(2);
    let l = q.l.unwrap_or(1);
    let m = q.m.unwrap_or(0);
    let count = q.count.unwrap_or(5_000).min(200_000);
    let mut config = SamplerConfig::default()
        .with_attempts_multiplier(q.attempts.unwrap_or(200).clamp(1, 2_000))
        .quiet();
    config.seed = q.seed;

    let result =
        tokio::task::spawn_blocking(move || generate_electron_cloud(n, l, m, count, &config)).await;

    match result {
        Ok(Ok(cloud)) => {
            info!(
                "sampled {}: {} / {} points",
                cloud.qn.label(),
                cloud.len(),
                count
            );
            let out = SampleResponse {
                n,
                l,
                m,
                count,
                accepted: cloud.len(),
                attempts: cloud.attempts,
                efficiency: cloud.efficiency(),
                half_width: cloud.half_width,
                samples: cloud.points,
            };
            Json(out).into_response()
        }
        Ok(Err(e)) => bad_request(e.to_string()),
        Err(e) => {
            error!("sampling task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn radial(Query(q): Query<RadialQuery>) -> Response {
    let n = q.n.unwrap_or(1);
    let l = q.l.unwrap_or(0);
    let r = radial_axis(q.r_max.unwrap_or(25.0).max(0.1), q.points.unwrap_or(1000).clamp(2, 20_000));
    match radial_probability_density(n, l, &r) {
        Ok(density) => Json(RadialResponse {
            n,
            l,
            r: r.to_vec(),
            density: density.to_vec(),
        })
        .into_response(),
        Err(e) => bad_request(e.to_string()),
    }
}

async fn slice_png(Query(q): Query<SliceQuery>) -> Response {
    let qn = match QuantumNumbers::new(q.n.unwrap_or(3), q.l.unwrap_or(2), q.m.unwrap_or(0)) {
        Ok(qn) => qn,
        Err(e) => return bad_request(e.to_string()),
    };
    let config = SliceConfig {
        grid_limit: q.grid_limit.unwrap_or(18.0).max(0.5),
        resolution: q.resolution.unwrap_or(250).clamp(8, 800),
        ..SliceConfig::default()
    };
    let z = q.z.unwrap_or(0.0);
    let cmap = Colormap::from_name(q.cmap.as_deref().unwrap_or("magma"));

    let encoded = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, String> {
        let vmax = estimate_max_density(qn, &config) * config.vmax_fraction;
        let img = render_slice(&slice_at(qn, z, &config), vmax, cmap);
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .map_err(|e| format!("encode png: {e}"))?;
        Ok(buf.into_inner())
    })
    .await;

    match encoded {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(Err(e)) => {
            error!("{e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("slice task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let app = Router::new()
        .route("/", get(index))
        .route("/samples", get(samples))
        .route("/radial", get(radial))
        .route("/slice.png", get(slice_png));
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Serving on http://127.0.0.1:3000");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("bind {addr}: {e}");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
    }
}
