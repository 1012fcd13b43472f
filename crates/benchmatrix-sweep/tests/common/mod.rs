//! Shared catalog and runner fixtures for sweep tests.

#![allow(dead_code)]

use benchmatrix_schema::{Catalog, RunnerRegistry, validate_master_config, validate_runner_config};

pub const SINGLE_NODE_CATALOG: &str = r#"
dsr1-fp8-h200-sglang:
  image: lmsysorg/sglang:v0.5.5-cu129-amd64
  model: deepseek-ai/DeepSeek-R1-0528
  model-prefix: dsr1
  runner: h200
  precision: fp8
  framework: sglang
  multinode: false
  seq-len-configs:
    - isl: 1024
      osl: 1024
      search-space:
        - { tp: 4, conc-start: 4, conc-end: 64 }
        - { tp: 8, conc-start: 4, conc-end: 64, ep: 2, dp-attn: true }
    - isl: 1024
      osl: 8192
      search-space:
        - { tp: 8, conc-start: 4, conc-end: 32 }
    - isl: 8192
      osl: 1024
      search-space:
        - { tp: 8, conc-start: 4, conc-end: 16 }
gptoss-fp4-b200-vllm:
  image: vllm/vllm-openai:v0.11.0
  model: openai/gpt-oss-120b
  model-prefix: gptoss
  runner: b200
  precision: fp4
  framework: vllm
  multinode: false
  seq-len-configs:
    - isl: 1024
      osl: 1024
      search-space:
        - { tp: 1, conc-start: 4, conc-end: 128 }
        - { tp: 2, conc-start: 4, conc-end: 128 }
        - { tp: 4, conc-start: 4, conc-end: 64 }
        - { tp: 8, conc-start: 4, conc-end: 8 }
"#;

pub const MULTI_NODE_CATALOG: &str = r#"
dsr1-fp4-gb200-dynamo-trt:
  image: nvcr.io#nvidia/ai-dynamo/tensorrtllm-runtime:0.5.1-rc0.pre3
  model: deepseek-r1-fp4
  model-prefix: dsr1
  runner: gb200
  precision: fp4
  framework: dynamo-trt
  multinode: true
  disagg: true
  seq-len-configs:
    - isl: 1024
      osl: 1024
      search-space:
        - spec-decoding: mtp
          conc-list: [1, 2, 4, 8, 16, 36]
          prefill:
            num-worker: 1
            tp: 4
            ep: 4
            dp-attn: false
            additional-settings: ["PREFILL_MAX_NUM_TOKENS=4608"]
          decode:
            num-worker: 4
            tp: 8
            ep: 8
            dp-attn: false
            additional-settings: ["DECODE_MAX_NUM_TOKENS=128"]
        - conc-list: [64, 128]
          prefill:
            num-worker: 1
            tp: 4
            ep: 4
            dp-attn: true
          decode:
            num-worker: 1
            tp: 8
            ep: 8
            dp-attn: true
    - isl: 8192
      osl: 1024
      search-space:
        - conc-start: 4
          conc-end: 40
          prefill:
            num-worker: 2
            tp: 4
            ep: 4
            dp-attn: false
          decode:
            num-worker: 1
            tp: 16
            ep: 16
            dp-attn: true
"#;

pub const RUNNERS: &str = r#"
h200: [h200-nv_1, h200-nv_2, h200-cr_0]
b200: [b200-nb_0, b200-nb_1]
gb200: [gb200-nv_0]
h100: [h100-cr_0]
"#;

pub fn catalog(text: &str) -> Catalog {
    let doc: serde_yaml::Value = serde_yaml::from_str(text).expect("fixture catalog parses");
    validate_master_config(&doc).expect("fixture catalog validates")
}

pub fn single_node_catalog() -> Catalog {
    catalog(SINGLE_NODE_CATALOG)
}

pub fn multi_node_catalog() -> Catalog {
    catalog(MULTI_NODE_CATALOG)
}

pub fn mixed_catalog() -> Catalog {
    catalog(&format!("{SINGLE_NODE_CATALOG}{MULTI_NODE_CATALOG}"))
}

pub fn runners() -> RunnerRegistry {
    let doc: serde_yaml::Value = serde_yaml::from_str(RUNNERS).expect("fixture runners parse");
    validate_runner_config(&doc).expect("fixture runners validate")
}

/// A one-entry single-node catalog with a single search-space point.
pub fn one_point_catalog(point: &str, isl: u32, osl: u32) -> Catalog {
    catalog(&format!(
        r#"
test-config:
  image: test:latest
  model: test/model
  model-prefix: test
  precision: fp8
  framework: vllm
  runner: h200
  multinode: false
  seq-len-configs:
    - isl: {isl}
      osl: {osl}
      search-space:
        - {point}
"#
    ))
}
