//! Shared layer fixtures for the merge scenarios

#![allow(dead_code)]

use serde_json::{json, Value};

/// Global config with one locked root key
pub fn global_config() -> Value {
    json!({
        "gOne": "Global1",
        "gTwo": "Global2",
        "gThree": "Global3",
        "globalLock": ["gTwo"]
    })
}

/// Global config with a nested object
pub fn nested_global_config(locks: &[&str]) -> Value {
    json!({
        "gOne": "Global1",
        "gTwo": "Global2",
        "gThree": "Global3",
        "gNest": {
            "gNest1": "GNEST1",
            "gNest2": "GNEST2"
        },
        "globalLock": locks
    })
}

/// Secondary config overriding two root keys
pub fn secondary_config() -> Value {
    json!({
        "lOne": "Lambda1",
        "lTwo": "Lambda2",
        "lNest": {"lNest1": "Nest1"},
        "globalOverride": {
            "gOne": "FromLambda1",
            "gTwo": "FromLambda2"
        }
    })
}

/// Secondary config overriding root and nested keys
pub fn nested_secondary_config() -> Value {
    json!({
        "lOne": "Lambda1",
        "lTwo": "Lambda2",
        "lNest": {"lNest1": "Nest1"},
        "globalOverride": {
            "gOne": "FromLambda1",
            "gTwo": "FromLambda2",
            "gNest": {
                "gNest1": "LAMBDANEST1",
                "gNest2": "LAMBDANEST2",
                "gNest3": {
                    "gNest3": "toBeDeleted",
                    "gNest3a": "shouldStay"
                }
            }
        }
    })
}

/// Global config with utterance definitions
pub fn utterances_config() -> Value {
    json!({
        "gOne": "Global1",
        "gTwo": "Global2",
        "gThree": "Global3",
        "globalLock": ["gTwo"],
        "UTTERANCES": {
            "YES": {
                "type": "RESPONSE",
                "variations": ["sure"]
            },
            "SAMSUNG": {
                "variations": ["same song", "samsung"]
            }
        }
    })
}

/// Menu flow config with an array of audio prompts
pub fn flow_config() -> Value {
    json!({
        "menuConfig": {
            "initial": {
                "audios": [
                    {"type": "Play", "content": "GREATING.wav"},
                    {"type": "Say", "content": "We found your acount with Sprint."},
                    {"type": "Say", "content": "Is this correct?"}
                ],
                "reporting": {
                    "outcome": "Prompt permission",
                    "reportKey": "7790"
                }
            },
            "maxNoInput": 3,
            "maxNoMatch": 3,
            "menuType": "TwiMLMenu",
            "numDigits": 5
        }
    })
}
