use ferrite_ann::{Error, TrainingData};
use rand::{rngs::StdRng, SeedableRng};

fn sample() -> TrainingData {
    TrainingData::from_rows(
        &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]],
        &[vec![0.1], vec![0.2], vec![0.3]],
    )
    .unwrap()
}

#[test]
fn views_expose_examples_without_copying() {
    let data = sample();
    let inputs = data.inputs();
    assert!(!inputs.buffer().is_owned());
    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs.width(), 3);
    assert_eq!(inputs.row(1), &[4.0, 5.0, 6.0]);
    assert_eq!(data.outputs().to_rows(), vec![vec![0.1], vec![0.2], vec![0.3]]);
    assert_eq!(&inputs.buffer()[..], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn load_copies_caller_buffers() {
    let mut inputs = vec![vec![1.0, 1.0], vec![0.0, 1.0]];
    let outputs = vec![vec![0.0], vec![1.0]];
    let mut data = TrainingData::new();
    data.load(&inputs, &outputs).unwrap();
    inputs[0][0] = 42.0;
    assert_eq!(data.input(0), &[1.0, 1.0]);
}

#[test]
fn duplicate_is_independent_of_later_loads() {
    let mut data = sample();
    let copy = data.duplicate();
    data.load(&[vec![0.0]], &[vec![1.0, 1.0]]).unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(copy, sample());
    assert_eq!(copy.num_input(), 3);
    assert_eq!(copy.output(2), &[0.3]);
}

#[test]
fn loading_into_a_duplicate_leaves_the_original_alone() {
    let data = sample();
    let mut copy = data.duplicate();
    copy.load(&[vec![5.0, 5.0]], &[vec![1.0]]).unwrap();

    assert_eq!(copy.len(), 1);
    assert_eq!(data, sample());
    assert_eq!(data.input(0), &[1.0, 2.0, 3.0]);
}

#[test]
fn failed_load_keeps_previous_examples() {
    let mut data = sample();
    assert!(matches!(
        data.load(&[vec![1.0]], &[vec![1.0], vec![2.0]]),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(data.load(&[vec![1.0], vec![1.0, 2.0]], &[vec![1.0], vec![2.0]]).is_err());
    assert_eq!(data, sample());
}

#[test]
fn shuffle_keeps_pairs_together() {
    let mut data = sample();
    data.shuffle(&mut StdRng::seed_from_u64(4));
    assert_eq!(data.len(), 3);
    for (input, output) in data.iter() {
        let expected = match input[0] as i32 {
            1 => 0.1,
            4 => 0.2,
            _ => 0.3,
        };
        assert_eq!(output, &[expected]);
    }
}

#[test]
fn merge_and_subset() {
    let data = sample();
    let merged = data.merge(&data.subset(1, 2).unwrap()).unwrap();
    assert_eq!(merged.len(), 5);
    assert_eq!(merged.input(3), &[4.0, 5.0, 6.0]);
    assert_eq!(merged.output(4), &[0.3]);

    assert!(data.subset(2, 5).is_err());
    let narrow = TrainingData::from_rows(&[vec![1.0]], &[vec![1.0]]).unwrap();
    assert!(data.merge(&narrow).is_err());
    assert_eq!(TrainingData::new().merge(&data).unwrap(), data);
}

#[test]
fn json_round_trip() {
    let data = sample();
    let path = std::env::temp_dir().join("ferrite_ann_training_data.json");
    let path = path.to_str().unwrap();
    data.save_json(path).unwrap();
    let loaded = TrainingData::load_json(path).unwrap();
    std::fs::remove_file(path).ok();
    assert_eq!(loaded, data);
}

#[test]
fn load_json_rejects_inconsistent_tables() {
    let files = [
        // One input row declared, no outputs.
        r#"{"inputs":{"data":[1.0,2.0],"width":2,"len":1},"outputs":{"data":[],"width":1,"len":0}}"#,
        // Storage shorter than the declared rows.
        r#"{"inputs":{"data":[1.0,2.0],"width":2,"len":2},"outputs":{"data":[1.0,2.0],"width":1,"len":2}}"#,
    ];
    let path = std::env::temp_dir().join("ferrite_ann_corrupt_training_data.json");
    let path = path.to_str().unwrap();
    for json in files {
        std::fs::write(path, json).unwrap();
        assert!(matches!(
            TrainingData::load_json(path),
            Err(Error::DimensionMismatch { .. })
        ));
    }
    std::fs::remove_file(path).ok();
}
