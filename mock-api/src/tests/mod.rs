mod responder_tests;
