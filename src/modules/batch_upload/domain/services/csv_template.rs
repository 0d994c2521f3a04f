/// Canonical employee CSV template offered to operators before an upload
///
/// Column names are matched flexibly by the server ("First Name" and
/// "firstname" both work), but the template uses the canonical snake_case
/// forms.

/// Columns every row must provide
pub const REQUIRED_COLUMNS: &[&str] = &["first_name", "last_name"];

/// Columns the import accepts but does not require
pub const OPTIONAL_COLUMNS: &[&str] = &[
    "middle_name",
    "ssn",
    "date_of_birth",
    "email",
    "phone",
    "license_number",
    "license_type",
    "license_state",
];

/// Template file name suggested to callers saving the template to disk
pub const TEMPLATE_FILE_NAME: &str = "employee_template.csv";

/// Build the downloadable CSV template: header plus two sample rows
pub fn employee_csv_template() -> String {
    let header = REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{header}\n\
         John,Doe,Michael,123-45-6789,1980-01-15,john.doe@example.com,555-123-4567,12345,MD,CA\n\
         Jane,Smith,,987-65-4321,1975-05-20,jane.smith@example.com,555-987-6543,67890,RN,NY"
    )
}
