//! Territory generation in both modes for a small star map

use territory_contours::*;

fn main() -> Result<()> {
    println!("=== territory_contours Demo ===\n");

    let factions = vec![
        Faction::new(1, Rgb(0xd13f3f)),
        Faction::new(2, Rgb(0x3f6fd1)),
        Faction::new(3, Rgb(0x3fd16f)),
    ];
    let sites = vec![
        Site::owned(0, -120.0, -40.0, FactionId(1)),
        Site::owned(1, -80.0, 30.0, FactionId(1)),
        Site::owned(2, 60.0, 0.0, FactionId(2)),
        Site::owned(3, 110.0, 70.0, FactionId(2)),
        Site::unowned(4, 0.0, 140.0),
        Site::owned(5, 20.0, -150.0, FactionId(3)),
    ];
    println!("{} sites, {} factions", sites.len(), factions.len());

    let mut territories = Territories::new();
    territories.setup(WorldSnapshot::new(sites, factions));

    let grid_style = TerritoryStyle::from_map_settings(2.0, 3.0, 2.0);
    let tessellation_style = TerritoryStyleBuilder::new()
        .mode(TerritoryMode::Tessellation)
        .max_distance(DEFAULT_MAX_DISTANCE)?
        .build()?;

    for style in [grid_style, tessellation_style] {
        println!("\nMode: {}", style.mode);
        let geometry = territories.draw(&style)?;

        for layer in &geometry.layers {
            let owner = match layer.owner {
                Some(id) => format!("faction {}", id.0),
                None => "neutral".to_string(),
            };
            println!(
                "  {:<10} {:>4} polygons, {:>4} segments",
                owner,
                layer.polygons.len(),
                layer.segments.len()
            );
        }
        println!(
            "  total: {} polygons, {} segments",
            geometry.polygon_count(),
            geometry.segment_count()
        );
    }

    territories.set_visibility(150.0);
    println!("\nVisible at 150% zoom: {}", territories.is_visible());

    println!("\n=== Demo Complete ===");
    Ok(())
}
