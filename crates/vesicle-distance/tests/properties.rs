use approx::{assert_abs_diff_eq, assert_relative_eq};
use vesicle_distance::core::{
    extract_points, measure_all, nearest_distance, resample_polyline, ResampleParams,
    ResampledPath,
};
use vesicle_distance::{
    analyze, AnalysisParams, Calibration, Error, PhysicalPoint, PixelPoint, Roi, RoiKind,
};

fn pixels(pts: &[[f64; 2]]) -> Vec<PixelPoint> {
    pts.iter().copied().map(PixelPoint::from).collect()
}

fn dense_path(cal: &Calibration, pts: &[[f64; 2]]) -> ResampledPath {
    let chain = extract_points(&pixels(pts), cal);
    resample_polyline(&chain, cal, &ResampleParams::default()).expect("resample")
}

fn boundary() -> Vec<[f64; 2]> {
    vec![[12.0, 40.0], [30.0, 22.0], [55.0, 25.5], [71.0, 48.0], [90.0, 47.0]]
}

fn markers() -> Vec<[f64; 2]> {
    vec![[60.0, 10.0], [15.0, 70.0], [40.0, 40.0], [88.0, 20.0]]
}

fn session_rois(offset: [f64; 2]) -> Vec<Roi> {
    let shift = |[x, y]: [f64; 2]| [x + offset[0], y + offset[1]];
    let mut rois = vec![Roi::line(boundary().into_iter().map(shift))];
    rois.extend(markers().into_iter().map(shift).map(|[x, y]| Roi::point(x, y)));
    rois
}

fn distances(rois: &[Roi], cal: &Calibration) -> Vec<f64> {
    analyze(rois, cal, &AnalysisParams::default())
        .expect("analyze")
        .results
        .iter()
        .map(|r| r.distance)
        .collect()
}

#[test]
fn straight_segment_yields_interior_unit_steps() {
    let path = dense_path(&Calibration::uncalibrated(), &[[0.0, 0.0], [10.0, 0.0]]);
    let xs: Vec<f64> = path.samples().iter().map(|p| p.x()).collect();
    assert_eq!(xs, (1..=9).map(f64::from).collect::<Vec<_>>());
    assert!(path.samples().iter().all(|p| p.y() == 0.0));
}

#[test]
fn isotropic_spacing_matches_pixel_size() {
    for s in [0.25, 1.0, 3.5] {
        let cal = Calibration::isotropic(s, "nm").unwrap();
        let path = dense_path(&cal, &[[0.0, 0.0], [40.0, 30.0]]);
        for w in path.samples().windows(2) {
            assert_abs_diff_eq!(w[0].distance(&w[1]), s, epsilon = 1e-9);
        }
    }
}

#[test]
fn duplicate_vertex_adds_no_samples() {
    let cal = Calibration::uncalibrated();
    let path = dense_path(&cal, &[[5.0, 5.0], [5.0, 5.0], [10.0, 10.0]]);
    let direct = dense_path(&cal, &[[5.0, 5.0], [10.0, 10.0]]);
    assert_eq!(path, direct);
    // |(5,5)->(10,10)| = 7.07 -> seven unit steps inside the segment.
    assert_eq!(path.len(), 7);
}

#[test]
fn point_above_line_is_about_five_away() {
    let path = dense_path(&Calibration::uncalibrated(), &[[0.0, 0.0], [10.0, 0.0]]);
    let d = nearest_distance(&PhysicalPoint::new(0.0, 5.0), &path).unwrap();
    assert_relative_eq!(d, 26.0_f64.sqrt(), epsilon = 1e-12);
    assert!((d - 5.0).abs() < 0.1);
}

#[test]
fn distances_are_translation_invariant() {
    let cal = Calibration::new(0.7, 0.7, "nm").unwrap();
    let base = distances(&session_rois([0.0, 0.0]), &cal);
    let moved = distances(&session_rois([123.0, -48.0]), &cal);
    assert_eq!(base.len(), moved.len());
    for (a, b) in base.iter().zip(&moved) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn distances_scale_linearly_with_calibration() {
    let cal = Calibration::new(0.5, 0.8, "nm").unwrap();
    let rois = session_rois([0.0, 0.0]);
    let base = distances(&rois, &cal);
    for k in [0.1, 2.0, 7.5] {
        let scaled = distances(&rois, &cal.scaled(k).unwrap());
        for (a, b) in base.iter().zip(&scaled) {
            assert_relative_eq!(a * k, *b, max_relative = 1e-9);
        }
    }
}

#[test]
fn empty_path_never_yields_a_distance() {
    let empty = ResampledPath::default();
    let q = PhysicalPoint::new(1.0, 1.0);
    assert_eq!(nearest_distance(&q, &empty), Err(Error::EmptyBoundary));
    assert_eq!(measure_all(&[q, q], &empty), Err(Error::EmptyBoundary));
}

#[test]
fn results_follow_unsorted_query_order() {
    let rois = vec![
        Roi::point(3.0, 9.0).with_name("far"),
        Roi::point(7.0, 1.0).with_name("near"),
        Roi::line([[0.0, 0.0], [10.0, 0.0]]),
        Roi::point(5.0, 4.0).with_name("mid"),
        Roi::new(RoiKind::Area, pixels(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]])),
    ];
    let out = analyze(&rois, &Calibration::uncalibrated(), &AnalysisParams::default()).unwrap();
    let names: Vec<_> = out.results.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, ["far", "near", "mid"]);
    let d: Vec<f64> = out.results.iter().map(|r| r.distance).collect();
    assert_eq!(d, vec![9.0, 1.0, 4.0]);
}
