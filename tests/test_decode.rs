extern crate bvr_postprocess;

use approx::assert_abs_diff_eq;
use half::f16;
use ndarray::{array, Array2};
use bvr_postprocess::common::{BvrBox, RawOutputTensor};
use bvr_postprocess::data::ConfidenceMode;
use bvr_postprocess::detection_runners::{decode, decode_par, decode_tensor, DecodeParams};
use bvr_postprocess::PostProcessError;

fn params_416(num_classes: usize) -> DecodeParams {
    DecodeParams::new((416, 416), (416, 416), num_classes)
}

#[test]
fn single_row_above_thresholds_gives_one_candidate() {
    let tensor = RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.95, 0.1]]);

    let candidates = decode_tensor(&tensor, &params_416(2)).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].class_id, 0);
    assert_eq!(candidates[0].confidence, 0.95);
    assert_eq!(candidates[0].bbox, BvrBox::new(166, 166, 83, 83));
}

#[test]
fn low_objectness_rows_are_dropped_whatever_the_scores() {
    let tensor = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, 0.5, 0.99, 0.99],
        [0.5, 0.5, 0.2, 0.2, 0.3, 1.0, 0.0],
        [0.5, 0.5, 0.2, 0.2, 0.0, 0.0, 1.0],
    ]);

    let candidates = decode_tensor(&tensor, &params_416(2)).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn class_score_at_threshold_is_dropped() {
    let tensor = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, 0.9, 0.5, 0.1],
        [0.5, 0.5, 0.2, 0.2, 0.9, 0.1, 0.2],
    ]);

    let candidates = decode_tensor(&tensor, &params_416(2)).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn tied_scores_resolve_to_lowest_class_id() {
    let tensor = RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.7, 0.7, 0.3]]);

    let candidates = decode_tensor(&tensor, &params_416(3)).unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].class_id, 0);
    assert_eq!(candidates[0].confidence, 0.7);
}

#[test]
fn axes_are_rescaled_independently() {
    let tensor = RawOutputTensor::new(array![[0.5, 0.5, 0.25, 0.5, 0.9, 0.8]]);
    let params = DecodeParams::new((416, 416), (832, 208), 1);

    let candidates = decode_tensor(&tensor, &params).unwrap();

    // cx = cy = 208, w = 104, h = 208, sx = 2, sy = 0.5
    assert_eq!(candidates[0].bbox, BvrBox::new(312, 52, 208, 104));
}

#[test]
fn coordinates_truncate_toward_zero_and_are_not_clipped() {
    let tensor = RawOutputTensor::new(array![[0.0, 0.0, 0.15, 0.15, 0.9, 0.9]]);
    let params = DecodeParams::new((100, 100), (100, 100), 1);

    let candidates = decode_tensor(&tensor, &params).unwrap();

    // top-left is -7.5 in both axes; truncation gives -7 where floor would give -8
    assert_eq!(candidates[0].bbox.x1, -7);
    assert_eq!(candidates[0].bbox.y1, -7);
    assert_eq!(candidates[0].bbox.w, 15);
    assert_eq!(candidates[0].bbox.h, 15);
}

#[test]
fn extra_columns_past_the_class_scores_are_ignored() {
    let tensor = RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.6, 0.7, 0.99]]);

    let candidates = decode_tensor(&tensor, &params_416(2)).unwrap();

    assert_eq!(candidates[0].class_id, 1);
    assert_eq!(candidates[0].confidence, 0.7);
}

#[test]
fn short_rows_fail_strict_decode() {
    let tensor = RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.95]]);

    let err = decode_tensor(&tensor, &params_416(3)).err().unwrap();
    match err {
        PostProcessError::InvalidTensorShape { tensor, row_len, expected } => {
            assert_eq!(tensor, 0);
            assert_eq!(row_len, 6);
            assert_eq!(expected, 8);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_tensor_is_skipped_and_counted() {
    let bad = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, 0.9, 0.95],
        [0.1, 0.1, 0.2, 0.2, 0.9, 0.95],
    ]);
    let good = RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.1, 0.95]]);

    let report = decode(&[bad, good], &params_416(2)).unwrap();

    assert_eq!(report.skipped_tensors, 1);
    assert_eq!(report.skipped_rows, 2);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].class_id, 1);
}

#[test]
fn empty_tensors_decode_to_nothing_without_error() {
    let tensors = vec![
        RawOutputTensor::empty(7),
        RawOutputTensor::from_rows(vec![]).unwrap(),
    ];

    let report = decode(&tensors, &params_416(2)).unwrap();

    assert!(report.candidates.is_empty());
    assert_eq!(report.skipped_tensors, 0);
    assert_eq!(report.skipped_rows, 0);
}

#[test]
fn candidates_keep_tensor_then_row_order() {
    let first = RawOutputTensor::new(array![
        [0.1, 0.1, 0.1, 0.1, 0.9, 0.6, 0.0],
        [0.2, 0.2, 0.1, 0.1, 0.9, 0.0, 0.7],
    ]);
    let second = RawOutputTensor::new(array![[0.8, 0.8, 0.1, 0.1, 0.9, 0.9, 0.0]]);

    let report = decode(&[first, second], &params_416(2)).unwrap();
    let confidences = report.candidates.iter().map(|c| c.confidence).collect::<Vec<_>>();

    assert_eq!(confidences, vec![0.6, 0.7, 0.9]);
}

#[test]
fn parallel_decode_matches_sequential() {
    let tensors = (0..6)
        .map(|t| {
            let mut data = Array2::<f32>::zeros((20, 8));
            for (r, mut row) in data.rows_mut().into_iter().enumerate() {
                let v = ((t * 20 + r) % 10) as f32 / 10.0;
                row[0] = v;
                row[1] = 1.0 - v;
                row[2] = 0.1;
                row[3] = 0.2;
                row[4] = 0.55 + v / 4.0;
                row[5 + (r % 3)] = 0.4 + v / 2.0;
            }
            RawOutputTensor::new(data)
        })
        .collect::<Vec<_>>();
    let params = DecodeParams::new((320, 256), (1280, 720), 3);

    assert_eq!(decode(&tensors, &params).unwrap(), decode_par(&tensors, &params).unwrap());
}

#[test]
fn product_mode_reports_objectness_times_score() {
    let tensor = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, 0.9, 0.8],
        [0.5, 0.5, 0.2, 0.2, 0.6, 0.8],
    ]);
    let params = params_416(1).with_confidence_mode(ConfidenceMode::ObjectnessTimesClass);

    let candidates = decode_tensor(&tensor, &params).unwrap();

    // 0.6 * 0.8 = 0.48 no longer clears the class threshold
    assert_eq!(candidates.len(), 1);
    assert_abs_diff_eq!(candidates[0].confidence, 0.72, epsilon = 1e-6);
}

#[test]
fn nan_values_never_pass_a_gate() {
    let tensor = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, f32::NAN, 0.9],
        [0.5, 0.5, 0.2, 0.2, 0.9, f32::NAN],
    ]);

    let candidates = decode_tensor(&tensor, &params_416(1)).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn half_precision_tensors_are_widened() {
    let data = array![[0.5f32, 0.5, 0.25, 0.25, 0.875, 0.75]].mapv(f16::from_f32);
    let tensor = RawOutputTensor::from_f16(data.view());

    let candidates = decode_tensor(&tensor, &params_416(1)).unwrap();

    assert_eq!(candidates[0].bbox, BvrBox::new(156, 156, 104, 104));
    assert_eq!(candidates[0].confidence, 0.75);
}

#[test]
fn ragged_rows_are_rejected() {
    let err = RawOutputTensor::from_rows(vec![vec![0.0; 7], vec![0.0; 6]]).err().unwrap();
    assert!(matches!(err, PostProcessError::InvalidTensorShape { row_len: 6, expected: 7, .. }));
}

#[test]
fn nan_class_score_does_not_hide_a_valid_one() {
    let tensor = RawOutputTensor::new(array![
        [0.5, 0.5, 0.2, 0.2, 0.9, f32::NAN, 0.9],
        [0.5, 0.5, 0.2, 0.2, 0.9, 0.8, f32::NAN],
        [0.5, 0.5, 0.2, 0.2, 0.9, f32::NAN, f32::NAN],
    ]);

    let candidates = decode_tensor(&tensor, &params_416(2)).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!((candidates[0].class_id, candidates[0].confidence), (1, 0.9));
    assert_eq!((candidates[1].class_id, candidates[1].confidence), (0, 0.8));
}

#[test]
fn zero_input_size_fails_the_call_not_the_tensors() {
    let tensors = vec![
        RawOutputTensor::new(array![[0.5, 0.5, 0.2, 0.2, 0.9, 0.95]]),
        RawOutputTensor::new(array![[0.1, 0.1, 0.2, 0.2, 0.9, 0.95]]),
    ];
    let params = DecodeParams::new((0, 0), (0, 0), 1);

    for result in [decode(&tensors, &params), decode_par(&tensors, &params)] {
        assert!(matches!(result, Err(PostProcessError::InvalidInputSize { width: 0, height: 0 })));
    }
    assert!(matches!(
        decode_tensor(&tensors[0], &params),
        Err(PostProcessError::InvalidInputSize { .. })
    ));
}
