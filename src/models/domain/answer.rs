use serde::{Deserialize, Serialize};

// Per-type answer payloads, parsed out of the raw `answer` value of a submission.

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeAnswer {
    pub item_placements: Vec<ItemPlacement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlacement {
    pub item_id: String,
    pub category_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeAnswer {
    pub blank_answers: Vec<BlankAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankAnswer {
    pub blank_id: String,
    pub user_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionAnswer {
    pub sub_answers: Vec<SubAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAnswer {
    pub sub_question_id: String,
    pub user_answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_answer_reads_player_payload() {
        let raw = serde_json::json!({
            "itemPlacements": [
                { "itemId": "X", "categoryId": "cat-a" },
                { "itemId": "Y", "categoryId": "cat-b" }
            ]
        });

        let answer: CategorizeAnswer = serde_json::from_value(raw).expect("payload should parse");
        assert_eq!(answer.item_placements.len(), 2);
        assert_eq!(answer.item_placements[1].category_id, "cat-b");
    }

    #[test]
    fn missing_list_is_not_an_empty_answer() {
        let raw = serde_json::json!({});
        assert!(serde_json::from_value::<ClozeAnswer>(raw).is_err());
    }
}
