//! Simple ray tracer example.
//!
//! Renders a small scene with reflective and transparent shapes and saves
//! it as PNG (or PPM when the output name ends in `.ppm`).
//!
//! ```text
//! cargo run --example simple_render -- [output.png]
//! ```

use anyhow::Context;
use prism_core::{
    rgb8, AmbientLight, Cylinder, Double3, Material, Plane, PointLight, Polygon, Scene, Sphere,
    SpotLight, Surfaced, Triangle,
};
use prism_renderer::{
    color_to_rgba, render, render_to, CameraBuilder, Color, ImageBuffer, Point, Ray, Vector,
    WhittedTracer,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output.png".to_string());

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene()?;
    log::info!(
        "Scene '{}' built in {:?}: {} shapes, {} lights",
        scene.name,
        start.elapsed(),
        scene.shape_count(),
        scene.light_count()
    );

    // Set up camera
    let camera = CameraBuilder::new(
        Point::new(0.0, 0.0, 1000.0),
        Vector::new(0.0, 0.0, -1.0)?,
        Vector::new(0.0, 1.0, 0.0)?,
    )?
    .with_resolution(600, 600)
    .with_viewport_size(200.0, 200.0)
    .with_viewport_distance(1000.0)
    .with_anti_aliasing(9)
    .with_adaptive_supersampling()
    .with_multithreading(num_threads(), 1000)
    .build()?;

    let tracer = WhittedTracer::new(&scene);

    if filename.ends_with(".ppm") {
        let image = render(&camera, &tracer)?;
        save_ppm(&image, &filename).with_context(|| format!("failed to write {filename}"))?;
    } else {
        let (width, height) = camera.resolution();
        let mut image = image::RgbaImage::new(width, height);
        render_to(&camera, &tracer, &mut image)?;
        image
            .save(&filename)
            .with_context(|| format!("failed to write {filename}"))?;
    }

    log::info!("Saved to {}", filename);
    Ok(())
}

fn num_threads() -> usize {
    std::thread::available_parallelism().map_or(4, |n| n.get())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new("mirrors and glass")
        .with_background(rgb8(20, 20, 30))
        .with_ambient_light(AmbientLight::uniform(rgb8(255, 255, 255), 0.1));

    // Floor
    scene.add_shape(
        Plane::new(Point::new(0.0, -60.0, 0.0), Vector::new(0.0, 1.0, 0.0)?)
            .with_emission(rgb8(30, 30, 30))
            .with_material(
                Material::new()
                    .with_kd(Double3::splat(0.5))
                    .with_ks(Double3::splat(0.2))
                    .with_kr(Double3::splat(0.3))
                    .with_shininess(30),
            ),
    );

    // Back mirror
    scene.add_shape(
        Triangle::new(
            Point::new(-150.0, -150.0, -115.0),
            Point::new(150.0, -150.0, -135.0),
            Point::new(75.0, 75.0, -150.0),
        )?
        .with_emission(rgb8(10, 10, 10))
        .with_material(
            Material::new()
                .with_ks(Double3::splat(0.8))
                .with_shininess(60)
                .with_kr(Double3::ONE),
        ),
    );

    // Glass sphere with a solid core
    scene.add_shape(
        Sphere::new(Point::new(-50.0, -10.0, -50.0), 40.0)?
            .with_emission(rgb8(0, 0, 100))
            .with_material(
                Material::new()
                    .with_kd(Double3::splat(0.2))
                    .with_ks(Double3::splat(0.2))
                    .with_shininess(30)
                    .with_kt(Double3::splat(0.6)),
            ),
    );
    scene.add_shape(
        Sphere::new(Point::new(-50.0, -10.0, -50.0), 15.0)?
            .with_emission(rgb8(100, 20, 20))
            .with_material(
                Material::new()
                    .with_kd(Double3::splat(0.5))
                    .with_ks(Double3::splat(0.5))
                    .with_shininess(100),
            ),
    );

    // Standing cylinder
    scene.add_shape(
        Cylinder::new(
            Ray::new(Point::new(55.0, -60.0, -40.0), Vector::new(0.0, 1.0, 0.0)?),
            20.0,
            70.0,
        )?
        .with_emission(rgb8(40, 90, 40))
        .with_material(
            Material::new()
                .with_kd(Double3::splat(0.6))
                .with_ks(Double3::splat(0.3))
                .with_shininess(20),
        ),
    );

    // Tilted square tile
    scene.add_shape(
        Polygon::new(vec![
            Point::new(10.0, -58.0, 20.0),
            Point::new(40.0, -58.0, 20.0),
            Point::new(40.0, -50.0, 50.0),
            Point::new(10.0, -50.0, 50.0),
        ])?
        .with_emission(rgb8(120, 100, 20))
        .with_material(Material::new().with_kd(Double3::splat(0.4))),
    );

    scene.add_light(
        SpotLight::new(
            Color::new(2.7, 1.6, 1.6),
            Point::new(60.0, 50.0, 0.0),
            Vector::new(0.0, -1.0, -1.0)?,
        )
        .with_kl(4e-5)
        .with_kq(2e-7)
        .with_narrow_beam(2),
    );
    scene.add_light(
        PointLight::new(Color::new(0.6, 0.6, 0.6), Point::new(-100.0, 100.0, 100.0))
            .with_kl(1e-4)
            .with_kq(1e-6),
    );

    Ok(scene)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
