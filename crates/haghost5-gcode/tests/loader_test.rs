use haghost5_gcode::{
    parse_gcode, parse_layers, GcodeGeometry, GcodeLoader, ParseOptions, SegmentKind,
};

const ROUND_TRIP: &str = "G90\nG1 X10 Y0 Z0 E1 F1500\nG1 X20 Y0 Z0 E2\nG0 X20 Y0 Z5\n";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn lenient() -> ParseOptions {
    ParseOptions::default()
}

#[test]
fn test_round_trip_single_layer() {
    init_tracing();
    let result = parse_layers(ROUND_TRIP, &lenient()).unwrap();

    assert_eq!(result.layers.len(), 1);
    let layer = &result.layers[0];
    assert_eq!(layer.z, 0.0);
    assert_eq!(
        layer.extruding_vertices,
        vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 0.0, 0.0, 20.0, 0.0, 0.0]
    );
    // Travel up to Z5 stays on the open layer
    assert_eq!(layer.travel_vertices, vec![20.0, 0.0, 0.0, 20.0, 0.0, 5.0]);
    assert_eq!(result.stats.extruding_segments, 2);
    assert_eq!(result.stats.travel_segments, 1);
}

#[test]
fn test_g92_then_move() {
    let result = parse_layers("G92 X10\nG1 X15\n", &lenient()).unwrap();
    assert_eq!(result.layers.len(), 1);
    assert_eq!(
        result.layers[0].travel_vertices,
        vec![10.0, 0.0, 0.0, 15.0, 0.0, 0.0]
    );
}

#[test]
fn test_constant_z_extrusion_with_interleaved_travel() {
    let gcode = "G1 Z0.2 X1 E1\nG1 X2 E2\nG0 X5 Y5\nG1 X6 E3\nG1 X7 E4\n";
    let result = parse_layers(gcode, &lenient()).unwrap();

    assert_eq!(result.layers.len(), 1);
    assert_eq!(result.layers[0].z, 0.2);
    assert_eq!(result.layers[0].extruding_segment_count(), 4);
    assert_eq!(result.layers[0].travel_segment_count(), 1);
}

#[test]
fn test_new_z_while_extruding_opens_layer() {
    let gcode = "G1 X10 Z0.2 E1\nG1 X0 Z0.4 E2\nG1 X10 E3\n";
    let result = parse_layers(gcode, &lenient()).unwrap();

    let zs: Vec<f64> = result.layers.iter().map(|l| l.z).collect();
    assert_eq!(zs, vec![0.2, 0.4]);
    assert_eq!(result.layers[1].extruding_segment_count(), 2);
}

#[test]
fn test_new_z_while_travelling_keeps_layer() {
    let gcode = "G1 X10 Z0.2 E1\nG0 Z0.4\nG0 X0\n";
    let result = parse_layers(gcode, &lenient()).unwrap();

    assert_eq!(result.layers.len(), 1);
    assert_eq!(result.layers[0].z, 0.2);
    assert_eq!(result.layers[0].travel_segment_count(), 2);
}

#[test]
fn test_lazy_layer_uses_start_height() {
    let result = parse_layers("G92 Z3\nG0 X5 Z7\n", &lenient()).unwrap();
    assert_eq!(result.layers.len(), 1);
    assert_eq!(result.layers[0].z, 3.0);
}

#[test]
fn test_revisited_height_duplicates_layer() {
    let gcode = "G1 X1 Z0.2 E1\nG1 X2 Z0.4 E2\nG1 X3 Z0.2 E3\n";
    let result = parse_layers(gcode, &lenient()).unwrap();
    let zs: Vec<f64> = result.layers.iter().map(|l| l.z).collect();
    assert_eq!(zs, vec![0.2, 0.4, 0.2]);
}

#[test]
fn test_relative_extrusion() {
    let gcode = "G91\nG1 X10 E0.5\nG1 X10 E0.5\nG1 X10 E-1\nG90\nG1 X0\n";
    let result = parse_layers(gcode, &lenient()).unwrap();

    let layer = &result.layers[0];
    assert_eq!(layer.extruding_segment_count(), 2);
    assert_eq!(layer.travel_segment_count(), 2);
    assert_eq!(&layer.extruding_vertices[6..12], &[10.0, 0.0, 0.0, 20.0, 0.0, 0.0]);
    assert_eq!(&layer.travel_vertices[6..], &[30.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_comments_and_case() {
    let gcode = ";FLAVOR:Marlin\ng1 x10 e1 ; first line\n\n  \nG1 X20 E2;no space\n";
    let result = parse_layers(gcode, &lenient()).unwrap();
    assert_eq!(result.layers[0].extruding_segment_count(), 2);
    assert_eq!(result.stats.lines, 5);
}

#[test]
fn test_group_counts() {
    let gcode = "G1 X1 Z0.2 E1\nG1 X2 Z0.4 E2\nG1 X3 Z0.6 E3\n";

    let merged = parse_gcode(gcode, &lenient()).unwrap();
    assert_eq!(merged.groups.len(), 2);
    assert!(!merged.split_layer);

    let split = parse_gcode(gcode, &ParseOptions::new().with_split_layer(true)).unwrap();
    assert_eq!(split.groups.len(), 6);
    assert_eq!(split.segment_count(SegmentKind::Extruding), 3);
}

#[test]
fn test_lenient_nan_is_not_an_error() {
    init_tracing();
    let geometry = parse_gcode("G1 Xoops E1\nG1 X5 E2\n", &lenient()).unwrap();
    let extruding = &geometry.groups[0].positions;
    assert!(extruding[3].is_nan());
    assert_eq!(extruding[9], 5.0);
}

#[test]
fn test_lenient_nan_survives_json_export() {
    let geometry = parse_gcode("G1 X1 Y1 E1\nG1 Xoops Y2 E2\n", &lenient()).unwrap();
    let json = geometry.to_json().unwrap();

    let restored = GcodeGeometry::from_json(&json).unwrap();
    let extruding = &restored.groups[0].positions;
    assert_eq!(extruding.len(), 12);
    assert_eq!(&extruding[..6], &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    assert_eq!(&extruding[6..9], &[1.0, 1.0, 0.0]);
    assert!(extruding[9].is_nan());
    assert_eq!(&extruding[10..], &[2.0, 0.0]);
    assert_eq!(restored.groups[1], geometry.groups[1]);
}

#[test]
fn test_strict_rejects_malformed_number() {
    let err = parse_gcode("G1 X1 E1\nG1 Xoops E2\n", &ParseOptions::new().with_strict(true))
        .unwrap_err();
    assert!(err.is_gcode_error());
    assert_eq!(
        err.to_string(),
        "Invalid parameter 'Xoops' at line 2: value is not a number"
    );
}

#[test]
fn test_empty_document() {
    let geometry = parse_gcode("", &lenient()).unwrap();
    assert_eq!(geometry.groups.len(), 2);
    assert!(geometry.groups.iter().all(|g| g.is_empty()));
}

#[test]
fn test_loader_callbacks() {
    let loader = GcodeLoader::new();
    let mut loaded = None;
    loader.load(ROUND_TRIP, |geometry| loaded = Some(geometry));
    assert_eq!(loaded.unwrap().groups.len(), 2);

    let mut strict = GcodeLoader::with_options(ParseOptions::new().with_strict(true));
    strict.set_split_layer(true);
    let mut failure = None;
    strict.load_with(
        "G1 X?\n",
        |_| panic!("strict parse should fail"),
        |err| failure = Some(err.to_string()),
    );
    assert_eq!(
        failure.as_deref(),
        Some("Invalid parameter 'X?' at line 1: value is not a number")
    );

    // Without an error callback the failure is swallowed
    let mut called = false;
    strict.load("G1 X?\n", |_| called = true);
    assert!(!called);
}
