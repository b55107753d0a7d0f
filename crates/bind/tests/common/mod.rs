//! Entities shaped like generated tooling-API bindings, shared by the
//! integration tests.
#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use wsbind::descriptor::{FieldDef, TypeName};
use wsbind::xml::{XmlInputStream, XmlOutputStream};
use wsbind::{
    Base64Binary, BindConfig, Bindable, Enumeration, Result, ScalarKind, Slot, TypeMapper, TypeRegistry,
    TypeSchema, Value, WriterConfig,
};
use wsbind_support::xsd::XSD_NAMESPACE;

pub const SOBJECT_NS: &str = "urn:sobject.tooling.soap.sforce.com";
pub const TOOLING_NS: &str = "urn:tooling.soap.sforce.com";

pub const ID_TYPE: TypeName = TypeName::new(TOOLING_NS, "ID");
pub const SHARING_MODEL_TYPE: TypeName = TypeName::new(TOOLING_NS, "SharingModel");

// sObject

const FIELDS_TO_NULL: FieldDef = FieldDef::element(SOBJECT_NS, "fieldsToNull").repeated();
const ID: FieldDef = FieldDef::element(SOBJECT_NS, "Id").of_type(TOOLING_NS, "ID");

static SOBJECT: LazyLock<TypeSchema> = LazyLock::new(|| {
    TypeSchema::new(TypeName::new(SOBJECT_NS, "sObject"), &[FIELDS_TO_NULL, ID])
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SObject {
    pub fields_to_null: Slot<Vec<String>>,
    pub id: Slot<String>,
}

impl SObject {
    pub fn type_schema() -> &'static TypeSchema {
        &SOBJECT
    }

    /// An sObject as it reads back from the wire: repeated fields present.
    pub fn with_id(id: &str) -> Self {
        SObject {
            fields_to_null: Slot::new(Vec::new()),
            id: Slot::new(id.to_string()),
        }
    }
}

impl Bindable for SObject {
    fn schema(&self) -> &'static TypeSchema {
        &SOBJECT
    }

    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.read_slot(input, &SOBJECT.describe(&FIELDS_TO_NULL), &mut self.fields_to_null)?;
        mapper.read_slot(input, &SOBJECT.describe(&ID), &mut self.id)
    }

    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.write_slot(output, &SOBJECT.describe(&FIELDS_TO_NULL), &self.fields_to_null)?;
        mapper.write_slot(output, &SOBJECT.describe(&ID), &self.id)
    }
}

wsbind::field_value!(entity SObject);

// SharingModel

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingModel {
    Private,
    Read,
    ReadSelect,
    ReadWrite,
    ReadWriteTransfer,
    FullAccess,
    ControlledByParent,
}

impl Enumeration for SharingModel {
    fn from_lexical(text: &str) -> Option<Self> {
        Some(match text {
            "Private" => SharingModel::Private,
            "Read" => SharingModel::Read,
            "ReadSelect" => SharingModel::ReadSelect,
            "ReadWrite" => SharingModel::ReadWrite,
            "ReadWriteTransfer" => SharingModel::ReadWriteTransfer,
            "FullAccess" => SharingModel::FullAccess,
            "ControlledByParent" => SharingModel::ControlledByParent,
            _ => return None,
        })
    }

    fn as_lexical(&self) -> &'static str {
        match self {
            SharingModel::Private => "Private",
            SharingModel::Read => "Read",
            SharingModel::ReadSelect => "ReadSelect",
            SharingModel::ReadWrite => "ReadWrite",
            SharingModel::ReadWriteTransfer => "ReadWriteTransfer",
            SharingModel::FullAccess => "FullAccess",
            SharingModel::ControlledByParent => "ControlledByParent",
        }
    }
}

wsbind::field_value!(enumeration SharingModel);

// SecurityHealthCheck extends sObject

const CREATED_DATE: FieldDef =
    FieldDef::element(SOBJECT_NS, "CreatedDate").of_type(XSD_NAMESPACE, "dateTime");
const CUSTOM_BASELINE_ID: FieldDef =
    FieldDef::element(SOBJECT_NS, "CustomBaselineId").of_type(TOOLING_NS, "ID");
const DEFAULT_SHARING: FieldDef =
    FieldDef::element(SOBJECT_NS, "DefaultSharing").of_type(TOOLING_NS, "SharingModel");
const DURABLE_ID: FieldDef = FieldDef::element(SOBJECT_NS, "DurableId");
const HIGH_RISK_COUNT: FieldDef =
    FieldDef::element(SOBJECT_NS, "HighRiskCount").of_type(XSD_NAMESPACE, "int");
const LAST_RUN_DATE: FieldDef =
    FieldDef::element(SOBJECT_NS, "LastRunDate").of_type(XSD_NAMESPACE, "date");
const REPORT: FieldDef =
    FieldDef::element(SOBJECT_NS, "Report").of_type(XSD_NAMESPACE, "base64Binary");
const RISKS: FieldDef = FieldDef::element(SOBJECT_NS, "Risks")
    .of_type(SOBJECT_NS, "SecurityHealthCheckRisks")
    .repeated();
const SCHEDULED_TIME: FieldDef =
    FieldDef::element(SOBJECT_NS, "ScheduledTime").of_type(XSD_NAMESPACE, "time");
const SCORE: FieldDef = FieldDef::element(SOBJECT_NS, "Score").of_type(XSD_NAMESPACE, "decimal");

static SECURITY_HEALTH_CHECK: LazyLock<TypeSchema> = LazyLock::new(|| {
    TypeSchema::extends(
        TypeName::new(SOBJECT_NS, "SecurityHealthCheck"),
        SObject::type_schema(),
        &[
            CREATED_DATE,
            CUSTOM_BASELINE_ID,
            DEFAULT_SHARING,
            DURABLE_ID,
            HIGH_RISK_COUNT,
            LAST_RUN_DATE,
            REPORT,
            RISKS,
            SCHEDULED_TIME,
            SCORE,
        ],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityHealthCheck {
    pub base: SObject,
    pub created_date: Slot<DateTime<Utc>>,
    pub custom_baseline_id: Slot<String>,
    pub default_sharing: Slot<SharingModel>,
    pub durable_id: Slot<String>,
    pub high_risk_count: Slot<i32>,
    pub last_run_date: Slot<NaiveDate>,
    pub report: Slot<Base64Binary>,
    pub risks: Slot<Vec<SecurityHealthCheckRisks>>,
    pub scheduled_time: Slot<NaiveTime>,
    pub score: Slot<Decimal>,
}

impl SecurityHealthCheck {
    pub fn type_schema() -> &'static TypeSchema {
        &SECURITY_HEALTH_CHECK
    }

    pub fn with_id(id: &str) -> Self {
        SecurityHealthCheck {
            base: SObject::with_id(id),
            risks: Slot::new(Vec::new()),
            ..Default::default()
        }
    }
}

impl Bindable for SecurityHealthCheck {
    fn schema(&self) -> &'static TypeSchema {
        &SECURITY_HEALTH_CHECK
    }

    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        self.base.read_fields(input, mapper)?;
        let schema = Self::type_schema();
        mapper.read_slot(input, &schema.describe(&CREATED_DATE), &mut self.created_date)?;
        mapper.read_slot(input, &schema.describe(&CUSTOM_BASELINE_ID), &mut self.custom_baseline_id)?;
        mapper.read_slot(input, &schema.describe(&DEFAULT_SHARING), &mut self.default_sharing)?;
        mapper.read_slot(input, &schema.describe(&DURABLE_ID), &mut self.durable_id)?;
        mapper.read_slot(input, &schema.describe(&HIGH_RISK_COUNT), &mut self.high_risk_count)?;
        mapper.read_slot(input, &schema.describe(&LAST_RUN_DATE), &mut self.last_run_date)?;
        mapper.read_slot(input, &schema.describe(&REPORT), &mut self.report)?;
        mapper.read_slot(input, &schema.describe(&RISKS), &mut self.risks)?;
        mapper.read_slot(input, &schema.describe(&SCHEDULED_TIME), &mut self.scheduled_time)?;
        mapper.read_slot(input, &schema.describe(&SCORE), &mut self.score)
    }

    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        self.base.write_fields(output, mapper)?;
        let schema = Self::type_schema();
        mapper.write_slot(output, &schema.describe(&CREATED_DATE), &self.created_date)?;
        mapper.write_slot(output, &schema.describe(&CUSTOM_BASELINE_ID), &self.custom_baseline_id)?;
        mapper.write_slot(output, &schema.describe(&DEFAULT_SHARING), &self.default_sharing)?;
        mapper.write_slot(output, &schema.describe(&DURABLE_ID), &self.durable_id)?;
        mapper.write_slot(output, &schema.describe(&HIGH_RISK_COUNT), &self.high_risk_count)?;
        mapper.write_slot(output, &schema.describe(&LAST_RUN_DATE), &self.last_run_date)?;
        mapper.write_slot(output, &schema.describe(&REPORT), &self.report)?;
        mapper.write_slot(output, &schema.describe(&RISKS), &self.risks)?;
        mapper.write_slot(output, &schema.describe(&SCHEDULED_TIME), &self.scheduled_time)?;
        mapper.write_slot(output, &schema.describe(&SCORE), &self.score)
    }
}

wsbind::field_value!(entity SecurityHealthCheck);

// SecurityHealthCheckRisks extends sObject

const RISK_DURABLE_ID: FieldDef = FieldDef::element(SOBJECT_NS, "DurableId");
const ORG_VALUE: FieldDef = FieldDef::element(SOBJECT_NS, "OrgValue");
const RISK_TYPE: FieldDef = FieldDef::element(SOBJECT_NS, "RiskType");
const PARENT_CHECK: FieldDef = FieldDef::element(SOBJECT_NS, "SecurityHealthCheck")
    .of_type(SOBJECT_NS, "SecurityHealthCheck");
const PARENT_CHECK_ID: FieldDef = FieldDef::element(SOBJECT_NS, "SecurityHealthCheckId");
const SETTING: FieldDef = FieldDef::element(SOBJECT_NS, "Setting");
const SETTING_GROUP: FieldDef = FieldDef::element(SOBJECT_NS, "SettingGroup");
const SETTING_RISK_CATEGORY: FieldDef = FieldDef::element(SOBJECT_NS, "SettingRiskCategory");
const STANDARD_VALUE: FieldDef = FieldDef::element(SOBJECT_NS, "StandardValue");

static SECURITY_HEALTH_CHECK_RISKS: LazyLock<TypeSchema> = LazyLock::new(|| {
    TypeSchema::extends(
        TypeName::new(SOBJECT_NS, "SecurityHealthCheckRisks"),
        SObject::type_schema(),
        &[
            RISK_DURABLE_ID,
            ORG_VALUE,
            RISK_TYPE,
            PARENT_CHECK,
            PARENT_CHECK_ID,
            SETTING,
            SETTING_GROUP,
            SETTING_RISK_CATEGORY,
            STANDARD_VALUE,
        ],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityHealthCheckRisks {
    pub base: SObject,
    pub durable_id: Slot<String>,
    pub org_value: Slot<String>,
    pub risk_type: Slot<String>,
    pub security_health_check: Slot<SecurityHealthCheck>,
    pub security_health_check_id: Slot<String>,
    pub setting: Slot<String>,
    pub setting_group: Slot<String>,
    pub setting_risk_category: Slot<String>,
    pub standard_value: Slot<String>,
}

impl SecurityHealthCheckRisks {
    pub fn type_schema() -> &'static TypeSchema {
        &SECURITY_HEALTH_CHECK_RISKS
    }

    pub fn with_id(id: &str) -> Self {
        SecurityHealthCheckRisks {
            base: SObject::with_id(id),
            ..Default::default()
        }
    }
}

impl Bindable for SecurityHealthCheckRisks {
    fn schema(&self) -> &'static TypeSchema {
        &SECURITY_HEALTH_CHECK_RISKS
    }

    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        self.base.read_fields(input, mapper)?;
        let schema = Self::type_schema();
        mapper.read_slot(input, &schema.describe(&RISK_DURABLE_ID), &mut self.durable_id)?;
        mapper.read_slot(input, &schema.describe(&ORG_VALUE), &mut self.org_value)?;
        mapper.read_slot(input, &schema.describe(&RISK_TYPE), &mut self.risk_type)?;
        mapper.read_slot(input, &schema.describe(&PARENT_CHECK), &mut self.security_health_check)?;
        mapper.read_slot(input, &schema.describe(&PARENT_CHECK_ID), &mut self.security_health_check_id)?;
        mapper.read_slot(input, &schema.describe(&SETTING), &mut self.setting)?;
        mapper.read_slot(input, &schema.describe(&SETTING_GROUP), &mut self.setting_group)?;
        mapper.read_slot(input, &schema.describe(&SETTING_RISK_CATEGORY), &mut self.setting_risk_category)?;
        mapper.read_slot(input, &schema.describe(&STANDARD_VALUE), &mut self.standard_value)
    }

    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        self.base.write_fields(output, mapper)?;
        let schema = Self::type_schema();
        mapper.write_slot(output, &schema.describe(&RISK_DURABLE_ID), &self.durable_id)?;
        mapper.write_slot(output, &schema.describe(&ORG_VALUE), &self.org_value)?;
        mapper.write_slot(output, &schema.describe(&RISK_TYPE), &self.risk_type)?;
        mapper.write_slot(output, &schema.describe(&PARENT_CHECK), &self.security_health_check)?;
        mapper.write_slot(output, &schema.describe(&PARENT_CHECK_ID), &self.security_health_check_id)?;
        mapper.write_slot(output, &schema.describe(&SETTING), &self.setting)?;
        mapper.write_slot(output, &schema.describe(&SETTING_GROUP), &self.setting_group)?;
        mapper.write_slot(output, &schema.describe(&SETTING_RISK_CATEGORY), &self.setting_risk_category)?;
        mapper.write_slot(output, &schema.describe(&STANDARD_VALUE), &self.standard_value)
    }
}

wsbind::field_value!(entity SecurityHealthCheckRisks);

// QueryResult

const DONE: FieldDef = FieldDef::element(TOOLING_NS, "done")
    .of_type(XSD_NAMESPACE, "boolean")
    .required();
const QUERY_LOCATOR: FieldDef = FieldDef::element(TOOLING_NS, "queryLocator");
const RECORDS: FieldDef = FieldDef::element(TOOLING_NS, "records")
    .of_type(SOBJECT_NS, "sObject")
    .repeated();
const SIZE: FieldDef = FieldDef::element(TOOLING_NS, "size")
    .of_type(XSD_NAMESPACE, "int")
    .required();

static QUERY_RESULT: LazyLock<TypeSchema> = LazyLock::new(|| {
    TypeSchema::new(
        TypeName::new(TOOLING_NS, "QueryResult"),
        &[DONE, QUERY_LOCATOR, RECORDS, SIZE],
    )
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub done: Slot<bool>,
    pub query_locator: Slot<String>,
    pub records: Slot<Vec<Box<dyn Bindable>>>,
    pub size: Slot<i32>,
}

impl Bindable for QueryResult {
    fn schema(&self) -> &'static TypeSchema {
        &QUERY_RESULT
    }

    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.read_slot(input, &QUERY_RESULT.describe(&DONE), &mut self.done)?;
        mapper.read_slot(input, &QUERY_RESULT.describe(&QUERY_LOCATOR), &mut self.query_locator)?;
        mapper.read_slot(input, &QUERY_RESULT.describe(&RECORDS), &mut self.records)?;
        mapper.read_slot(input, &QUERY_RESULT.describe(&SIZE), &mut self.size)
    }

    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.write_slot(output, &QUERY_RESULT.describe(&DONE), &self.done)?;
        mapper.write_slot(output, &QUERY_RESULT.describe(&QUERY_LOCATOR), &self.query_locator)?;
        mapper.write_slot(output, &QUERY_RESULT.describe(&RECORDS), &self.records)?;
        mapper.write_slot(output, &QUERY_RESULT.describe(&SIZE), &self.size)
    }
}

// Parameter: unqualified elements and an anyType value

const PARAM_NAME: FieldDef = FieldDef::element(TOOLING_NS, "name").unqualified().required();
const PARAM_VALUE: FieldDef = FieldDef::element(TOOLING_NS, "value")
    .of_type(XSD_NAMESPACE, "anyType")
    .unqualified();

static PARAMETER: LazyLock<TypeSchema> = LazyLock::new(|| {
    TypeSchema::new(TypeName::new(TOOLING_NS, "Parameter"), &[PARAM_NAME, PARAM_VALUE])
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: Slot<String>,
    pub value: Slot<Value>,
}

impl Bindable for Parameter {
    fn schema(&self) -> &'static TypeSchema {
        &PARAMETER
    }

    fn read_fields(&mut self, input: &mut XmlInputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.read_slot(input, &PARAMETER.describe(&PARAM_NAME), &mut self.name)?;
        mapper.read_slot(input, &PARAMETER.describe(&PARAM_VALUE), &mut self.value)
    }

    fn write_fields(&self, output: &mut XmlOutputStream<'_>, mapper: &TypeMapper) -> Result<()> {
        mapper.write_slot(output, &PARAMETER.describe(&PARAM_NAME), &self.name)?;
        mapper.write_slot(output, &PARAMETER.describe(&PARAM_VALUE), &self.value)
    }
}

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register::<SObject>()
        .register::<SecurityHealthCheck>()
        .register::<SecurityHealthCheckRisks>()
        .register::<QueryResult>()
        .register::<Parameter>()
        .register_simple(ID_TYPE, ScalarKind::String)
        .register_simple(SHARING_MODEL_TYPE, ScalarKind::String);
    registry
}

pub fn config() -> BindConfig {
    BindConfig {
        writer: WriterConfig::default()
            .with_prefix(SOBJECT_NS, "sf")
            .with_prefix(TOOLING_NS, "tns"),
        ..Default::default()
    }
}

pub fn mapper() -> TypeMapper {
    TypeMapper::with_config(Arc::new(registry()), config())
}

pub fn mapper_with(config: BindConfig) -> TypeMapper {
    TypeMapper::with_config(Arc::new(registry()), config)
}
