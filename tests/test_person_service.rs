mod mocks;

use chrono::NaiveDate;
use mocks::{MockContactRepository, MockPersonRepository, MockPersonnelRepository};
use registry_mcp_server::domain::CountryCode;
use registry_mcp_server::error::RegistryError;
use registry_mcp_server::matching::MatchType;
use registry_mcp_server::models::{Contact, NewPerson, Person, Personnel};
use registry_mcp_server::repositories::PersonRepository;
use registry_mcp_server::services::{PersonService, PersonServiceImpl};
use std::sync::Arc;

struct Fixture {
    persons: MockPersonRepository,
    contacts: MockContactRepository,
    personnel: MockPersonnelRepository,
    service: PersonServiceImpl,
}

fn setup() -> Fixture {
    let persons = MockPersonRepository::new();
    let contacts = MockContactRepository::new();
    let personnel = MockPersonnelRepository::new();

    persons.add_person(Person::new(1, "Martin", "Léa"));
    persons.add_person(Person::new(2, "Dupont", "Marie"));
    persons.add_person(Person::new(3, "Dupont", "Alain"));
    persons.add_person(Person::new(4, "Smith", "John"));

    let service = PersonServiceImpl::new(
        Arc::new(persons.clone()),
        Arc::new(contacts.clone()),
        Arc::new(personnel.clone()),
        5,
        30,
    );

    Fixture {
        persons,
        contacts,
        personnel,
        service,
    }
}

#[tokio::test]
async fn test_list_persons_sorted_by_last_then_first_name() {
    let fx = setup();

    let persons = fx.service.list_persons().await.unwrap();
    let names: Vec<String> = persons.iter().map(|p| p.full_name()).collect();

    assert_eq!(
        names,
        vec!["Alain Dupont", "Marie Dupont", "Léa Martin", "John Smith"]
    );
    assert_eq!(fx.persons.get_call_count("list"), 1);
}

#[tokio::test]
async fn test_list_persons_keeps_repository_order() {
    let fx = setup();

    let from_repo: Vec<i64> = fx.persons.list().await.unwrap().iter().map(|p| p.id).collect();
    let from_service: Vec<i64> = fx
        .service
        .list_persons()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(from_service, from_repo);
    assert_eq!(from_service, vec![3, 2, 1, 4]);
}

#[tokio::test]
async fn test_person_details_include_optional_records() {
    let fx = setup();
    fx.contacts.add_contact(Contact {
        id: 1,
        person_id: 4,
        address: "221B Baker Street".to_string(),
        city: "London".to_string(),
        country: CountryCode::Uk,
        phone_number: "07123456789".to_string(),
    });
    fx.personnel.add_personnel(Personnel {
        id: 1,
        person_id: 4,
        age: 45,
        height_m: 1.83,
        weight_kg: 82.0,
    });

    let details = fx.service.get_person_details(4).await.unwrap();
    assert_eq!(details.person.id, 4);
    assert_eq!(details.contact.unwrap().city, "London");
    assert_eq!(details.personnel.unwrap().age, 45);

    let bare = fx.service.get_person_details(1).await.unwrap();
    assert!(bare.contact.is_none());
    assert!(bare.personnel.is_none());
}

#[tokio::test]
async fn test_person_details_not_found() {
    let fx = setup();

    let result = fx.service.get_person_details(404).await;
    assert!(matches!(
        result,
        Err(RegistryError::NotFound { entity: "Person", id: 404 })
    ));
}

#[tokio::test]
async fn test_create_person_trims_names() {
    let fx = setup();

    let created = fx
        .service
        .create_person(NewPerson {
            last_name: "  Bernard ".to_string(),
            first_name: "Chloé".to_string(),
            membership_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        })
        .await
        .unwrap();

    assert_eq!(created.last_name, "Bernard");
    assert_eq!(created.id, 5);
    assert_eq!(fx.persons.len(), 5);
}

#[tokio::test]
async fn test_create_person_requires_names() {
    let fx = setup();

    let err = fx
        .service
        .create_person(NewPerson {
            last_name: " ".to_string(),
            first_name: String::new(),
            membership_date: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.messages().len(), 2);
    assert_eq!(fx.persons.get_call_count("create"), 0);
}

#[tokio::test]
async fn test_membership_date_set_then_cleared() {
    let fx = setup();

    let person = fx
        .service
        .update_membership_date(2, Some("2023-09-15".to_string()))
        .await
        .unwrap();
    assert_eq!(person.membership_date, NaiveDate::from_ymd_opt(2023, 9, 15));

    let person = fx
        .service
        .update_membership_date(2, Some(String::new()))
        .await
        .unwrap();
    assert_eq!(person.membership_date, None);

    let stored = fx.service.get_person_details(2).await.unwrap();
    assert_eq!(stored.person.membership_date, None);
}

#[tokio::test]
async fn test_membership_date_rejects_bad_format() {
    let fx = setup();

    let result = fx
        .service
        .update_membership_date(2, Some("15/09/2023".to_string()))
        .await;

    assert!(matches!(result, Err(RegistryError::Validation(_))));
    assert_eq!(fx.persons.get_call_count("update"), 0);
}

#[tokio::test]
async fn test_find_person_by_phone_and_name() {
    let fx = setup();
    fx.contacts.add_contact(Contact {
        id: 1,
        person_id: 1,
        address: "3 place Bellecour".to_string(),
        city: "Lyon".to_string(),
        country: CountryCode::Fr,
        phone_number: "+33 6 98 76 54 32".to_string(),
    });

    let response = fx
        .service
        .find_person(None, Some("0698765432".to_string()))
        .await
        .unwrap();
    assert_eq!(response.total_found, 1);
    assert_eq!(response.matches[0].person.id, 1);
    assert_eq!(response.matches[0].match_type, MatchType::ExactPhone);

    let response = fx
        .service
        .find_person(Some("marie dupont".to_string()), None)
        .await
        .unwrap();
    assert_eq!(response.matches[0].person.id, 2);
    assert_eq!(response.matches[0].match_type, MatchType::FuzzyName);
}

#[tokio::test]
async fn test_find_person_without_criteria_returns_nothing() {
    let fx = setup();

    let response = fx
        .service
        .find_person(Some("  ".to_string()), None)
        .await
        .unwrap();

    assert!(response.matches.is_empty());
    assert_eq!(fx.persons.get_call_count("list"), 0);
}
