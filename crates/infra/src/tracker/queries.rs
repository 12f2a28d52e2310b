//! GraphQL documents for the tracker's typed-field surface.
//!
//! Field definitions and item contents are queried through inline fragments
//! because the tracker models fields and values as interface types; nodes
//! that match none of the fragments deserialize as empty objects and are
//! skipped by the client.

pub const PROJECT_FIELDS: &str = r#"
    query($projectId: ID!, $first: Int!) {
        node(id: $projectId) {
            ... on ProjectV2 {
                fields(first: $first) {
                    nodes {
                        ... on ProjectV2Field {
                            id
                            name
                            dataType
                        }
                        ... on ProjectV2SingleSelectField {
                            id
                            name
                            dataType
                            options {
                                id
                                name
                            }
                        }
                    }
                }
            }
        }
    }
"#;

pub const PROJECT_ITEMS: &str = r#"
    query($projectId: ID!, $first: Int!) {
        node(id: $projectId) {
            ... on ProjectV2 {
                items(first: $first) {
                    nodes {
                        id
                        content {
                            ... on Issue {
                                id
                                number
                                title
                                body
                                state
                                createdAt
                                updatedAt
                                url
                            }
                        }
                        fieldValues(first: 10) {
                            nodes {
                                ... on ProjectV2ItemFieldTextValue {
                                    field {
                                        ... on ProjectV2Field {
                                            name
                                        }
                                    }
                                    text
                                }
                                ... on ProjectV2ItemFieldNumberValue {
                                    field {
                                        ... on ProjectV2Field {
                                            name
                                        }
                                    }
                                    number
                                }
                                ... on ProjectV2ItemFieldSingleSelectValue {
                                    field {
                                        ... on ProjectV2SingleSelectField {
                                            name
                                        }
                                    }
                                    name
                                }
                                ... on ProjectV2ItemFieldDateValue {
                                    field {
                                        ... on ProjectV2Field {
                                            name
                                        }
                                    }
                                    date
                                }
                            }
                        }
                    }
                }
            }
        }
    }
"#;

pub const ADD_ITEM: &str = r#"
    mutation($projectId: ID!, $contentId: ID!) {
        addProjectV2ItemById(input: {
            projectId: $projectId
            contentId: $contentId
        }) {
            item {
                id
            }
        }
    }
"#;

pub const UPDATE_SINGLE_SELECT_FIELD: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId
            itemId: $itemId
            fieldId: $fieldId
            value: { singleSelectOptionId: $optionId }
        }) {
            projectV2Item {
                id
            }
        }
    }
"#;

pub const UPDATE_NUMBER_FIELD: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $number: Float!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId
            itemId: $itemId
            fieldId: $fieldId
            value: { number: $number }
        }) {
            projectV2Item {
                id
            }
        }
    }
"#;

pub const UPDATE_TEXT_FIELD: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $text: String!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId
            itemId: $itemId
            fieldId: $fieldId
            value: { text: $text }
        }) {
            projectV2Item {
                id
            }
        }
    }
"#;

pub const UPDATE_DATE_FIELD: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $date: Date!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId
            itemId: $itemId
            fieldId: $fieldId
            value: { date: $date }
        }) {
            projectV2Item {
                id
            }
        }
    }
"#;
