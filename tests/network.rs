use ferrite_ann::{Connection, ConstructionError, Error, Network, Topology};

fn standard(layers: &[usize], seed: u64) -> Network {
    Network::with_seed(Topology::Standard, layers, seed).unwrap()
}

#[test]
fn construction_round_trips_layer_sizes() {
    for layers in [vec![2, 1], vec![2, 3, 1], vec![5, 8, 8, 3], vec![1, 1, 1, 1, 1]] {
        for topology in [Topology::Standard, Topology::Sparse { connection_rate: 0.4 }, Topology::Shortcut] {
            let net = Network::with_seed(topology, &layers, 7).unwrap();
            let sizes = net.layer_sizes().unwrap();
            assert!(sizes.is_owned());
            assert_eq!(sizes.into_owned(), layers);
            assert_eq!(net.num_input().unwrap(), layers[0]);
            assert_eq!(net.num_output().unwrap(), layers[layers.len() - 1]);
        }
    }
}

#[test]
fn invalid_layer_sequences_are_rejected() {
    let cases: [(&[usize], ConstructionError); 4] = [
        (&[], ConstructionError::TooFewLayers(0)),
        (&[4], ConstructionError::TooFewLayers(1)),
        (&[2, 0, 1], ConstructionError::EmptyLayer(1)),
        (&[0, 3], ConstructionError::EmptyLayer(0)),
    ];
    for (layers, expected) in cases {
        let mut fresh = Network::new();
        match fresh.create_standard(layers) {
            Err(Error::Construction(err)) => assert_eq!(err, expected),
            other => panic!("expected construction error for {layers:?}, got {other:?}"),
        }
        assert!(!fresh.is_constructed());
    }
}

#[test]
fn failed_reconstruction_keeps_prior_topology() {
    let mut net = standard(&[2, 3, 1], 1);
    let before = net.connections().unwrap().into_owned();
    assert!(net.create_shortcut(&[3]).is_err());
    assert!(net.create_sparse(0.0, &[2, 2]).is_err());
    assert_eq!(net.connections().unwrap().into_owned(), before);
    assert_eq!(&net.layer_sizes().unwrap()[..], &[2, 3, 1]);
}

#[test]
fn reconstruction_replaces_topology() {
    let mut net = standard(&[2, 3, 1], 1);
    net.create_shortcut(&[4, 2]).unwrap();
    assert_eq!(&net.layer_sizes().unwrap()[..], &[4, 2]);
    assert_eq!(net.network_type().unwrap(), Topology::Shortcut);
    assert_eq!(net.run(&[0.0; 4]).unwrap().len(), 2);
}

#[test]
fn run_checks_input_width() {
    let mut net = standard(&[2, 3, 1], 2);
    let out = net.run(&[0.0, 0.0]).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out.is_owned());
    assert_eq!(net.run(&[1.0, 1.0]).unwrap().len(), 1);

    let before = net.connections().unwrap().into_owned();
    for bad in [&[][..], &[1.0][..], &[1.0, 2.0, 3.0][..]] {
        assert!(matches!(
            net.run(bad),
            Err(Error::DimensionMismatch { expected: 2, .. })
        ));
    }
    assert_eq!(net.connections().unwrap().into_owned(), before);
}

#[test]
fn test_checks_both_widths_and_leaves_weights_alone() {
    let mut net = standard(&[2, 3, 2], 2);
    let before = net.connections().unwrap().into_owned();
    assert!(net.test(&[1.0, 0.0], &[1.0]).is_err());
    assert_eq!(net.mse(), 0.0);

    let out = net.test(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
    assert_eq!(out.len(), 2);
    assert!(net.mse() > 0.0);
    assert_eq!(net.connections().unwrap().into_owned(), before);

    net.reset_mse();
    assert_eq!(net.mse(), 0.0);
}

#[test]
fn standard_2_3_1_has_13_connections_including_bias() {
    let net = standard(&[2, 3, 1], 0);
    // (2 inputs + 1 bias) * 3 hidden + (3 hidden + 1 bias) * 1 output.
    assert_eq!(net.total_connections().unwrap(), 13);
    let conns = net.connections().unwrap();
    assert_eq!(conns.len(), 13);
    assert_eq!(&net.bias_counts().unwrap()[..], &[1, 1, 0]);
    assert!(conns.iter().all(|c| c.weight.abs() <= 0.1));

    let expected_pairs: Vec<(usize, usize)> = vec![
        (0, 3), (1, 3), (2, 3),
        (0, 4), (1, 4), (2, 4),
        (0, 5), (1, 5), (2, 5),
        (3, 7), (4, 7), (5, 7), (6, 7),
    ];
    let pairs: Vec<(usize, usize)> = conns.iter().map(|c| (c.from_neuron, c.to_neuron)).collect();
    assert_eq!(pairs, expected_pairs);
}

#[test]
fn sparse_networks_keep_a_fraction_of_connections() {
    let net = Network::with_seed(Topology::Sparse { connection_rate: 0.5 }, &[4, 6, 3], 3).unwrap();
    // 4x6 -> 12 kept + 6 bias, 6x3 -> 9 kept + 3 bias.
    assert_eq!(net.total_connections().unwrap(), 30);
    assert_eq!(net.connections().unwrap().len(), 30);
    assert_eq!(net.connection_rate().unwrap(), 0.5);

    let full = Network::with_seed(Topology::Sparse { connection_rate: 1.0 }, &[4, 6, 3], 3).unwrap();
    assert_eq!(full.total_connections().unwrap(), standard(&[4, 6, 3], 3).total_connections().unwrap());
}

#[test]
fn set_weights_is_idempotent() {
    let mut once = standard(&[2, 3, 1], 4);
    let mut twice = once.clone();
    let patch: Vec<Connection> = once.connections().unwrap().iter()
        .step_by(2)
        .map(|c| Connection::new(c.from_neuron, c.to_neuron, c.weight * -3.0 + 0.25))
        .collect();

    assert_eq!(once.set_weights(&patch).unwrap(), patch.len());
    twice.set_weights(&patch).unwrap();
    twice.set_weights(&patch).unwrap();
    assert_eq!(
        once.connections().unwrap().into_owned(),
        twice.connections().unwrap().into_owned()
    );
}

#[test]
fn set_weights_ignores_missing_connections() {
    let mut net = standard(&[2, 3, 1], 5);
    let before = net.connections().unwrap().into_owned();
    // Inputs do not feed the output directly, nothing feeds an input, id 42 does not exist.
    let bogus = [
        Connection::new(0, 7, 9.0),
        Connection::new(4, 1, 9.0),
        Connection::new(42, 3, 9.0),
        Connection::new(0, 42, 9.0),
    ];
    assert_eq!(net.set_weights(&bogus).unwrap(), 0);
    assert_eq!(net.connections().unwrap().into_owned(), before);
}

#[test]
fn set_weights_skips_pruned_sparse_connections() {
    let mut net = Network::with_seed(Topology::Sparse { connection_rate: 0.3 }, &[5, 5], 8).unwrap();
    let conns = net.connections().unwrap().into_owned();
    let missing = (0..5)
        .flat_map(|i| (6..11).map(move |j| (i, j)))
        .find(|&(i, j)| !conns.iter().any(|c| c.from_neuron == i && c.to_neuron == j))
        .unwrap();
    assert!(!net.set_weight(missing.0, missing.1, 5.0).unwrap());
    assert_eq!(net.connections().unwrap().into_owned(), conns);
}

#[test]
fn randomize_weights_respects_range_and_connectivity() {
    let mut net = Network::with_seed(Topology::Sparse { connection_rate: 0.5 }, &[3, 4, 2], 6).unwrap();
    let before = net.connections().unwrap().into_owned();
    net.randomize_weights(-2.0, 2.0).unwrap();
    let after = net.connections().unwrap().into_owned();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!((b.from_neuron, b.to_neuron), (a.from_neuron, a.to_neuron));
        assert!((-2.0..=2.0).contains(&a.weight));
    }
}

#[test]
fn cascade_parameters_survive_reconstruction() {
    let mut net = Network::new();
    assert_eq!(&net.cascade_activation_steepnesses()[..], &[0.25, 0.50, 0.75, 1.00]);
    assert!(!net.cascade_activation_steepnesses().is_owned());

    net.set_cascade_activation_steepnesses(&[0.1, 0.9]);
    net.create_standard(&[2, 2]).unwrap();
    assert_eq!(&net.cascade_activation_steepnesses()[..], &[0.1, 0.9]);
    assert_eq!(net.cascade_num_candidates(), 10 * 2 * 2);

    net.set_cascade_activation_functions(&[ferrite_ann::ActivationFunction::Gaussian]);
    net.set_cascade_num_candidate_groups(3);
    assert_eq!(net.cascade_num_candidates(), 6);
}

#[test]
fn network_json_round_trip() {
    let mut net = Network::with_seed(Topology::Shortcut, &[3, 4, 2], 9).unwrap();
    let path = std::env::temp_dir().join("ferrite_ann_network_round_trip.json");
    let path = path.to_str().unwrap();
    net.save_json(path).unwrap();
    let mut loaded = Network::load_json(path).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(
        net.connections().unwrap().into_owned(),
        loaded.connections().unwrap().into_owned()
    );
    let input = [0.3, -0.6, 0.9];
    assert_eq!(net.run(&input).unwrap(), loaded.run(&input).unwrap());
}

#[test]
fn load_json_rejects_graphs_that_disagree_with_their_layers() {
    let net = Network::with_seed(Topology::Standard, &[2, 3, 1], 10).unwrap();
    let path = std::env::temp_dir().join("ferrite_ann_corrupt_network.json");
    let path = path.to_str().unwrap();
    net.save_json(path).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

    let edits: [fn(&mut serde_json::Value); 3] = [
        |json| json["graph"]["layer_sizes"] = serde_json::json!([2, 3, 1, 4]),
        |json| json["graph"]["layer_sizes"] = serde_json::json!([2, 5, 1]),
        |json| json["graph"]["topology"] = serde_json::json!({ "kind": "shortcut" }),
    ];
    for edit in edits {
        let mut json = saved.clone();
        edit(&mut json);
        std::fs::write(path, json.to_string()).unwrap();
        assert!(matches!(Network::load_json(path), Err(Error::DimensionMismatch { .. })));
    }

    let mut json = saved.clone();
    json["graph"]["layer_sizes"] = serde_json::json!([0, 3, 1]);
    std::fs::write(path, json.to_string()).unwrap();
    assert!(matches!(Network::load_json(path), Err(Error::Construction(_))));

    std::fs::write(path, saved.to_string()).unwrap();
    let mut loaded = Network::load_json(path).unwrap();
    assert_eq!(loaded.run(&[0.0, 0.0]).unwrap().len(), 1);
    std::fs::remove_file(path).ok();
}
